//! Presign error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Presign operation errors.
#[derive(Debug, Error)]
pub enum PresignError {
    /// No object key was supplied.
    #[error("Please pass a object_key on the query string")]
    MissingKey,

    /// Extension is empty, too long or not alphanumeric.
    #[error("invalid file extension: {0}")]
    InvalidExtension(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl PresignError {
    /// Whether the caller is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingKey | Self::InvalidExtension(_))
    }
}
