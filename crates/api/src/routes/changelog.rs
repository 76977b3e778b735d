//! Changelog scraping route.

use axum::{Json, Router, extract::State, routing::get};
use tracing::info;

use coshub_core::changelog::ChangelogParagraph;
use coshub_shared::AppError;

use crate::AppState;
use crate::error::ApiError;
use crate::response::{Envelope, success};

/// Creates the changelog routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/changelog", get(changelog))
}

async fn changelog(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<ChangelogParagraph>>>, ApiError> {
    let service = state.changelog.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("changelog renderer is not configured".to_string())
    })?;

    let paragraphs = service.fetch().await?;
    info!(paragraphs = paragraphs.len(), "Changelog served");

    Ok(success(paragraphs))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{changelog_state, get, memory_state, send};
    use axum::http::StatusCode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_not_configured_is_503() {
        let (status, body) = send(memory_state(), get("/api/v1/changelog")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], 503);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_returns_paragraphs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/content"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div class="heraAdit-articleBody js-heraAdit-richText-body">
                   <div class="heading-h3">V 2.0</div><p>Sync fixes</p></div>"#,
            ))
            .mount(&server)
            .await;

        let state = changelog_state(format!("{}/content", server.uri()));
        let (status, body) = send(state, get("/api/v1/changelog")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["title"], "V2.0");
        assert_eq!(body["data"][0]["description"], "Syncfixes");
    }

    #[tokio::test]
    async fn test_renderer_failure_is_500() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let state = changelog_state(format!("{}/content", server.uri()));
        let (status, body) = send(state, get("/api/v1/changelog")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["data"].is_null());
    }
}
