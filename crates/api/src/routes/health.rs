//! Liveness route.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;
use crate::response::{Envelope, success};

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct Health {
    /// Always `healthy` while the process serves requests.
    pub status: &'static str,
    /// Crate version of the running build.
    pub version: &'static str,
}

async fn health() -> Json<Envelope<Health>> {
    success(Health {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the liveness routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
