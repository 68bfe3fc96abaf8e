use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("{slug} cannot be found")]
    NotFound { slug: String },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid repository source: {0}")]
    InvalidUrl(String),
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Clone failed: {0}")]
    CloneFailed(String),
    #[error("Clone operation timed out after {0} seconds")]
    CloneTimeout(u64),
}
impl DigestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DigestError::Io {
            path: path.into(),
            source,
        }
    }
}
