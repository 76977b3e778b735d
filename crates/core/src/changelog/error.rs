//! Changelog error types.

use thiserror::Error;

/// Changelog scraping errors.
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The rendering proxy failed or answered with an error status.
    #[error("renderer error: {0}")]
    Renderer(String),

    /// The configured container selector does not parse.
    #[error("invalid selector: {0}")]
    Selector(String),
}
