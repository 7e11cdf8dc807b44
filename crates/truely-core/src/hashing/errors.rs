use std::path::PathBuf;

use crate::errors::{ErrorClass, TruelyError};

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("File path is empty")]
    EmptyPath,

    #[error("Digest buffer too small: {capacity} bytes, need at least {required}")]
    BufferTooSmall { capacity: usize, required: usize },

    #[error("Failed to open '{}': {source}", path.display())]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File '{}' is not seekable: {source}", path.display())]
    SeekFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Read error while hashing '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TruelyError for HashError {
    fn error_code(&self) -> &'static str {
        match self {
            HashError::EmptyPath => "HASH_EMPTY_PATH",
            HashError::BufferTooSmall { .. } => "HASH_BUFFER_TOO_SMALL",
            HashError::OpenFailed { .. } => "HASH_OPEN_FAILED",
            HashError::SeekFailed { .. } => "HASH_SEEK_FAILED",
            HashError::ReadFailed { .. } => "HASH_READ_FAILED",
        }
    }

    fn class(&self) -> ErrorClass {
        match self {
            HashError::EmptyPath | HashError::BufferTooSmall { .. } => {
                ErrorClass::ContractViolation
            }
            HashError::OpenFailed { .. }
            | HashError::SeekFailed { .. }
            | HashError::ReadFailed { .. } => ErrorClass::IoFailure,
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            HashError::EmptyPath | HashError::BufferTooSmall { .. } | HashError::OpenFailed { .. }
        )
    }
}
