use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use time::OffsetDateTime;

use crate::error::{BlockerError, BlockerResult};
use crate::paths::EnginePaths;

/// What a restore actually did. Missing sources are reported outcomes, not
/// errors; the session keeps running either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RestoreOutcome {
    Restored { snapshot: PathBuf },
    TemplateMissing,
    OriginalBackupMissing,
}

/// Guards the one-time pristine copy of the hosts file and takes dated
/// snapshots before destructive restores.
pub struct BackupManager {
    paths: EnginePaths,
}

impl BackupManager {
    pub fn new(paths: EnginePaths) -> Self {
        Self { paths }
    }

    /// Take the pristine copy if none exists yet. Idempotent, so callers run
    /// it before every mutating operation. A missing live hosts file is fatal
    /// to the call. Returns whether a copy actually happened.
    pub fn ensure_original_backup(&self) -> BlockerResult<bool> {
        if !self.paths.hosts.exists() {
            return Err(BlockerError::HostsFileMissing(
                self.paths.hosts.display().to_string(),
            ));
        }
        if self.paths.original_backup.exists() {
            return Ok(false);
        }
        copy_create_new(&self.paths.hosts, &self.paths.original_backup)?;
        Ok(true)
    }

    /// Overwrite the live file with the default template, snapshotting the
    /// live file first. A missing template aborts without mutating anything.
    pub fn restore_from_template(&self) -> BlockerResult<RestoreOutcome> {
        if !self.paths.default_template.exists() {
            return Ok(RestoreOutcome::TemplateMissing);
        }
        let snapshot = self.snapshot_live("preDefaultRestore")?;
        fs::copy(&self.paths.default_template, &self.paths.hosts)
            .map_err(|e| BlockerError::from_io(e, &self.paths.hosts))?;
        Ok(RestoreOutcome::Restored { snapshot })
    }

    /// Overwrite the live file with the original backup, snapshotting the
    /// live file first. A missing backup aborts without mutating anything.
    pub fn restore_from_original(&self) -> BlockerResult<RestoreOutcome> {
        if !self.paths.original_backup.exists() {
            return Ok(RestoreOutcome::OriginalBackupMissing);
        }
        let snapshot = self.snapshot_live("preOriginalRestore")?;
        fs::copy(&self.paths.original_backup, &self.paths.hosts)
            .map_err(|e| BlockerError::from_io(e, &self.paths.hosts))?;
        Ok(RestoreOutcome::Restored { snapshot })
    }

    /// Copy the live file to `<hosts>.<tag>_<YYYYMMDD_HHMMSS>.bak`.
    /// Snapshots accumulate; retention is out of scope.
    fn snapshot_live(&self, tag: &str) -> BlockerResult<PathBuf> {
        let mut name = self.paths.hosts.clone().into_os_string();
        name.push(format!(".{}_{}.bak", tag, timestamp()));
        let snapshot = PathBuf::from(name);
        fs::copy(&self.paths.hosts, &snapshot)
            .map_err(|e| BlockerError::from_io(e, &self.paths.hosts))?;
        Ok(snapshot)
    }
}

/// Copy refusing to overwrite: the destination is opened create-new, so a
/// race that recreates it surfaces as an error instead of clobbering.
fn copy_create_new(src: &Path, dst: &Path) -> BlockerResult<()> {
    let bytes = fs::read(src).map_err(|e| BlockerError::from_io(e, src))?;
    let mut out = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .map_err(|e| BlockerError::from_io(e, dst))?;
    out.write_all(&bytes)
        .map_err(|e| BlockerError::from_io(e, dst))?;
    Ok(())
}

/// Second-resolution local timestamp, `YYYYMMDD_HHMMSS`. Falls back to UTC
/// when the local offset cannot be determined.
fn timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let fmt = time::format_description::parse("[year][month][day]_[hour][minute][second]")
        .unwrap();
    now.format(&fmt).unwrap()
}
