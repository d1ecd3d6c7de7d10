use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// System hosts file location, overridable through HOSTBLOCK_HOSTS_FILE for
/// dry runs against a scratch file.
pub fn hosts_path() -> PathBuf {
    if let Ok(path) = std::env::var("HOSTBLOCK_HOSTS_FILE") {
        return PathBuf::from(path);
    }
    if cfg!(target_os = "windows") {
        let root = std::env::var("SystemRoot").unwrap_or_else(|_| r"C:\Windows".to_string());
        PathBuf::from(root).join(r"System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// Directory holding the original backup, the default template and the
/// blocklist files. Defaults to the executable's directory, overridable
/// through HOSTBLOCK_DATA_DIR.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HOSTBLOCK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writability probe standing in for an elevation check: opening the hosts
/// file for append fails with EACCES when the process is not privileged.
pub fn can_write(path: &Path) -> bool {
    fs::OpenOptions::new().append(true).open(path).is_ok()
}

/// Best-effort OS resolver cache flush so edits take effect immediately.
/// Failures are ignored; the hosts file itself is already updated.
pub fn flush_dns() {
    if cfg!(target_os = "windows") {
        let _ = Command::new("ipconfig").arg("/flushdns").output();
    } else if cfg!(target_os = "macos") {
        let _ = Command::new("dscacheutil").arg("-flushcache").output();
        let _ = Command::new("killall").args(["-HUP", "mDNSResponder"]).output();
    } else {
        let _ = Command::new("resolvectl").arg("flush-caches").output();
    }
}

/// Sorted `*.json` files under the blocklist directory.
pub fn blocklist_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .into_iter()
        .flatten()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|x| x.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}
