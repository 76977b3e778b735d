//! Page rendering through a browserless `/content` endpoint.

use coshub_core::changelog::{ChangelogError, PageRenderer, RenderRequest};
use tracing::debug;

/// Posts render requests to a headless-browser proxy.
#[derive(Clone)]
pub struct BrowserlessRenderer {
    client: reqwest::Client,
    endpoint: String,
}

impl BrowserlessRenderer {
    /// Create a renderer posting to `endpoint`.
    #[must_use]
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl PageRenderer for BrowserlessRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<String, ChangelogError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ChangelogError::Renderer(e.to_string()))?;

        let status = response.status();
        debug!(endpoint = %self.endpoint, status = status.as_u16(), "Renderer responded");

        if !status.is_success() {
            return Err(ChangelogError::Renderer(format!(
                "renderer returned status {status}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ChangelogError::Renderer(e.to_string()))
    }
}
