//! API route definitions.

use axum::Router;
use axum::http::Uri;

use coshub_shared::AppError;

use crate::AppState;
use crate::error::ApiError;

pub mod changelog;
pub mod health;
pub mod presign;
pub mod rehost;
pub mod uploads;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(presign::routes())
        .merge(uploads::routes())
        .merge(rehost::routes())
        .merge(changelog::routes())
}

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> ApiError {
    AppError::NotFound(uri.path().to_string()).into()
}
