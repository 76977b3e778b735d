//! Rehost error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Request-level rehost errors.
#[derive(Debug, Error)]
pub enum RehostError {
    /// The request carried no HTML.
    #[error("Missing HTML content in request body")]
    MissingHtml,

    /// The HTML rewriter failed.
    #[error("html processing failed: {0}")]
    Html(String),
}

impl RehostError {
    /// Whether the caller is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingHtml)
    }
}

/// Transport failure while downloading an image.
#[derive(Debug, Error)]
#[error("download failed: {0}")]
pub struct FetchError(pub String);

/// Why a single image was skipped.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Transport failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Origin answered with something other than 200.
    #[error("unexpected status code {0}")]
    Status(u16),

    /// Extension is not a supported image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Upload or existence check failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ImageError {
    /// Skips caused by the origin content rather than by a failure.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        matches!(self, Self::Status(_) | Self::UnsupportedFormat(_))
    }
}
