//! Storage-specific error type wrapping I/O and JSON errors.

use hearthmode_app::ports::StateError;

/// Errors originating from the JSON file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading, writing or renaming a state file failed.
    #[error("state file I/O error")]
    Io(#[from] std::io::Error),

    /// A state file exists but does not hold the expected JSON.
    #[error("state file JSON error")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for StateError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(error) => Self::Io(error),
            StorageError::Json(error) => Self::Corrupt(error.to_string()),
        }
    }
}
