//! Shared HTTP client construction.

use std::time::Duration;

use thiserror::Error;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client could not be built (TLS backend, invalid header values).
    #[error("failed to build http client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Build the client shared by the fetcher and the renderer.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised or the user
/// agent is not a valid header value.
pub fn build_http_client(
    timeout: Duration,
    user_agent: &str,
) -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?)
}
