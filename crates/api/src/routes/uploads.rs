//! Inline base64 image upload route.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use serde::Deserialize;
use tracing::info;

use coshub_core::inline::InlineUpload;

use crate::AppState;
use crate::error::ApiError;
use crate::response::{Envelope, success};

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/images/base64", post(upload_base64))
}

/// Request body carrying a base64 image.
#[derive(Debug, Default, Deserialize)]
pub struct Base64ImageRequest {
    /// Base64 payload, optionally as a data URI.
    pub image: Option<String>,
}

async fn upload_base64(
    State(state): State<AppState>,
    body: Result<Json<Base64ImageRequest>, JsonRejection>,
) -> Result<Json<Envelope<InlineUpload>>, ApiError> {
    let Json(request) = body?;
    let upload = state.inline.upload(request.image.as_deref()).await?;

    info!(
        object_key = %upload.object_key,
        size = upload.size,
        "Inline image uploaded"
    );

    Ok(success(upload))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{PUBLIC_BASE, memory_state, post_json, send};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let state = memory_state();
        let storage = state.storage.clone();
        let image = STANDARD.encode(b"\x89PNG\r\n\x1a\n");

        let (status, body) = send(
            state,
            post_json("/api/v1/images/base64", &json!({ "image": image })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let url = body["data"]["url"].as_str().unwrap();
        let key = url
            .strip_prefix(&format!("{PUBLIC_BASE}/"))
            .expect("public url");
        assert!(key.starts_with("xmind/zapier_"));
        assert!(key.ends_with(".png"));
        assert!(storage.exists(key).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_image_is_400() {
        let (status, body) =
            send(memory_state(), post_json("/api/v1/images/base64", &json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["msg"],
            "Please pass a base64 encoded image in the request body"
        );
    }

    #[tokio::test]
    async fn test_invalid_base64_is_400() {
        let (status, _) = send(
            memory_state(),
            post_json("/api/v1/images/base64", &json!({ "image": "%%%" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_uses_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/images/base64")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(memory_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        assert!(body["data"].is_null());
    }
}
