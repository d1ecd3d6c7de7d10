use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlockerError {
    #[error("hosts file not found: {0}")]
    HostsFileMissing(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("malformed blocklist: {0}")]
    MalformedBlocklist(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BlockerError {
    /// Map an I/O failure against a known path, surfacing permission problems
    /// as their own kind so the outermost caller can report them.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            BlockerError::AccessDenied(path.display().to_string())
        } else {
            BlockerError::Io(err)
        }
    }
}

pub type BlockerResult<T> = Result<T, BlockerError>;
