//! Storage error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("google auth failed: {0}")]
    Auth(String),

    #[error("drive api error: {0}")]
    Api(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl StoreError {
    /// True when the underlying cause is a read-only or permission-denied
    /// filesystem, the failure mode of serverless deploys without a
    /// writable data directory.
    pub fn is_read_only_fs(&self) -> bool {
        match self {
            StoreError::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::ReadOnlyFilesystem
            ),
            _ => false,
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
