//! Changelog service implementation.

use std::sync::Arc;

use tracing::info;

use super::error::ChangelogError;
use super::parser::parse_changelog;
use super::types::{ChangelogParagraph, ChangelogSettings, RenderRequest};

/// Renders a page through a headless browser and returns its HTML.
///
/// This trait is implemented by the clients crate against a browserless
/// `/content` endpoint.
pub trait PageRenderer: Send + Sync {
    /// Render the page described by `request`.
    fn render(
        &self,
        request: &RenderRequest,
    ) -> impl std::future::Future<Output = Result<String, ChangelogError>> + Send;
}

/// Scrapes the configured changelog page.
pub struct ChangelogService<R: PageRenderer> {
    renderer: Arc<R>,
    settings: ChangelogSettings,
}

impl<R: PageRenderer> ChangelogService<R> {
    /// Create a new changelog service.
    #[must_use]
    pub fn new(renderer: Arc<R>, settings: ChangelogSettings) -> Self {
        Self { renderer, settings }
    }

    /// Render the page and split it into paragraphs.
    ///
    /// An empty list is a valid result.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the selector is invalid.
    pub async fn fetch(&self) -> Result<Vec<ChangelogParagraph>, ChangelogError> {
        let request = self.settings.render_request();
        let html = self.renderer.render(&request).await?;

        let paragraphs = parse_changelog(
            &html,
            &self.settings.container_selector,
            &self.settings.heading_class,
        )?;

        info!(
            page_url = %self.settings.page_url,
            html_bytes = html.len(),
            paragraphs = paragraphs.len(),
            "Changelog scraped"
        );

        Ok(paragraphs)
    }

    /// Get the settings.
    #[must_use]
    pub fn settings(&self) -> &ChangelogSettings {
        &self.settings
    }
}
