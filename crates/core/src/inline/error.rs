//! Inline upload error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Inline upload errors.
#[derive(Debug, Error)]
pub enum InlineError {
    /// No image was supplied.
    #[error("Please pass a base64 encoded image in the request body")]
    MissingImage,

    /// The payload is not valid base64.
    #[error("Image is not valid base64: {0}")]
    InvalidBase64(String),

    /// Upload failed.
    #[error("Error uploading image: {0}")]
    Storage(#[from] StorageError),
}

impl InlineError {
    /// Whether the caller is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingImage | Self::InvalidBase64(_))
    }
}
