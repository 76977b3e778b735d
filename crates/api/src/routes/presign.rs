//! Presigned upload URL routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use coshub_core::presign::{ExtensionTicket, PresignedUpload};

use crate::AppState;
use crate::error::ApiError;
use crate::response::{Envelope, success};

/// Creates the presign routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/presigned-url", get(presigned_url))
        .route("/upload-url/{extension}", get(upload_url))
}

/// Query parameters for a caller-named upload.
#[derive(Debug, Deserialize)]
pub struct PresignQuery {
    /// Requested object name; its extension picks the folder.
    pub object_key: Option<String>,
}

/// Presign a PUT for `object_key`, classified into a dated folder.
async fn presigned_url(
    State(state): State<AppState>,
    Query(query): Query<PresignQuery>,
) -> Result<Json<Envelope<PresignedUpload>>, ApiError> {
    let upload = state
        .presign
        .issue(query.object_key.as_deref().unwrap_or_default(), Utc::now())
        .await?;

    info!(
        object_key = %upload.object_key,
        expires_at = %upload.expires_at,
        "Presigned upload URL issued"
    );

    Ok(success(upload))
}

/// Presign a PUT for a new object named by time and extension.
async fn upload_url(
    State(state): State<AppState>,
    Path(extension): Path<String>,
) -> Result<Json<Envelope<ExtensionTicket>>, ApiError> {
    let ticket = state
        .presign
        .issue_for_extension(&extension, Utc::now())
        .await?;

    info!(object_key = %ticket.object_key, "Extension upload URL issued");

    Ok(success(ticket))
}
