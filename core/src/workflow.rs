use std::path::Path;

use serde::Serialize;

use crate::backup::{BackupManager, RestoreOutcome};
use crate::blocklist::expand::{expand, BlockEntry};
use crate::blocklist::parser::load_blocklist;
use crate::error::BlockerResult;
use crate::hosts::document::HostsDocument;
use crate::paths::EnginePaths;

/// Result of applying one blocklist file to the hosts file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    /// Category name, taken from the blocklist file stem.
    pub category: String,
    pub presets: usize,
    pub entries: usize,
}

/// Session-level operations over one hosts file.
///
/// Every operation re-reads and rewrites the whole file; nothing is cached
/// in between, and each write is a single whole-file overwrite. Single
/// process, single user; concurrent writers are not defended against.
pub struct BlockerEngine {
    paths: EnginePaths,
    backups: BackupManager,
}

impl BlockerEngine {
    pub fn new(paths: EnginePaths) -> Self {
        Self {
            backups: BackupManager::new(paths.clone()),
            paths,
        }
    }

    pub fn paths(&self) -> &EnginePaths {
        &self.paths
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Expand every preset in the blocklist file into one appended category
    /// block named after the file stem. Re-applying the same file appends a
    /// second block; the per-call dedup is scoped to each preset expansion.
    pub fn apply_blocklist(&self, blocklist_path: &Path) -> BlockerResult<ApplyOutcome> {
        self.backups.ensure_original_backup()?;
        let category = blocklist_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("blocklist")
            .to_string();
        let blocklist = load_blocklist(blocklist_path)?;

        let mut entries: Vec<BlockEntry> = Vec::new();
        for preset in &blocklist.presets {
            entries.extend(expand(preset));
        }
        let entry_count = entries.len();

        let mut doc = HostsDocument::load(&self.paths.hosts)?;
        doc.append_category_block(&category, entries);
        doc.save(&self.paths.hosts)?;

        Ok(ApplyOutcome {
            category,
            presets: blocklist.presets.len(),
            entries: entry_count,
        })
    }

    /// Append one manual entry for the domain, exactly as given.
    pub fn block_site(&self, domain: &str) -> BlockerResult<()> {
        self.backups.ensure_original_backup()?;
        let mut doc = HostsDocument::load(&self.paths.hosts)?;
        doc.append_single_entry(domain);
        doc.save(&self.paths.hosts)
    }

    /// Remove the first matching manual entry. Absent domains are a no-op
    /// and skip the rewrite entirely.
    pub fn unblock_site(&self, domain: &str) -> BlockerResult<bool> {
        self.backups.ensure_original_backup()?;
        let mut doc = HostsDocument::load(&self.paths.hosts)?;
        let removed = doc.remove_entry(domain);
        if removed {
            doc.save(&self.paths.hosts)?;
        }
        Ok(removed)
    }

    /// Raw lines of the live hosts file.
    pub fn list_hosts(&self) -> BlockerResult<Vec<String>> {
        let doc = HostsDocument::load(&self.paths.hosts)?;
        Ok(doc.raw_lines().map(str::to_string).collect())
    }

    pub fn restore_default(&self) -> BlockerResult<RestoreOutcome> {
        self.backups.ensure_original_backup()?;
        self.backups.restore_from_template()
    }

    /// Does not run `ensure_original_backup` first; a missing backup is
    /// reported through the outcome.
    pub fn restore_original(&self) -> BlockerResult<RestoreOutcome> {
        self.backups.restore_from_original()
    }
}
