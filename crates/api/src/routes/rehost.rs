//! HTML image rehosting routes.
//!
//! `/html/images` names uploads by time and position; `/v2/html/images`
//! names them by content hash so repeated images share one object.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use chrono::Utc;
use tracing::info;

use coshub_core::rehost::{RehostMode, RehostReport, RehostRequest};

use crate::AppState;
use crate::error::ApiError;
use crate::response::{Envelope, success};

/// Creates the rehost routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/html/images", post(rehost_sequential))
        .route("/v2/html/images", post(rehost_content_hash))
}

async fn rehost_sequential(
    State(state): State<AppState>,
    body: Result<Json<RehostRequest>, JsonRejection>,
) -> Result<Json<Envelope<RehostReport>>, ApiError> {
    rehost(&state, body, RehostMode::Sequential).await
}

async fn rehost_content_hash(
    State(state): State<AppState>,
    body: Result<Json<RehostRequest>, JsonRejection>,
) -> Result<Json<Envelope<RehostReport>>, ApiError> {
    rehost(&state, body, RehostMode::ContentHash).await
}

async fn rehost(
    state: &AppState,
    body: Result<Json<RehostRequest>, JsonRejection>,
    mode: RehostMode,
) -> Result<Json<Envelope<RehostReport>>, ApiError> {
    let Json(request) = body?;
    let report = state.rehoster.rehost(request, mode, Utc::now()).await?;

    info!(
        ?mode,
        total_processed = report.total_processed,
        "HTML images rehosted"
    );

    Ok(success(report))
}
