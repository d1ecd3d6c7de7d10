use std::path::{Path, PathBuf};

/// Filesystem locations the engine operates on. Everything is passed in
/// explicitly so tests can point the whole engine at a temporary directory.
#[derive(Debug, Clone)]
pub struct EnginePaths {
    /// The live hosts file.
    pub hosts: PathBuf,
    /// One-time pristine copy, created before the first mutation.
    pub original_backup: PathBuf,
    /// Clean template used by restore-default.
    pub default_template: PathBuf,
}

impl EnginePaths {
    pub fn new(
        hosts: impl Into<PathBuf>,
        original_backup: impl Into<PathBuf>,
        default_template: impl Into<PathBuf>,
    ) -> Self {
        Self {
            hosts: hosts.into(),
            original_backup: original_backup.into(),
            default_template: default_template.into(),
        }
    }

    /// Conventional layout: the backup and template live in the tool's data
    /// directory as `hosts_original.bak` and `hosts_default.txt`.
    pub fn under_data_dir(hosts: impl Into<PathBuf>, data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            hosts: hosts.into(),
            original_backup: data_dir.join("hosts_original.bak"),
            default_template: data_dir.join("hosts_default.txt"),
        }
    }
}
