//! Chat style errors.

use thiserror::Error;

use launcher_protocols::StorageError;

#[derive(Debug, Error)]
pub enum ChatStyleError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ChatStyleError {
    fn from(e: serde_json::Error) -> Self {
        ChatStyleError::Serialization(e.to_string())
    }
}
