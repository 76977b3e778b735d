//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - The `{code, data, msg}` response envelope
//! - Mapping of domain errors to HTTP statuses

pub mod error;
pub mod response;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use coshub_clients::{BrowserlessRenderer, ClientError, HttpImageFetcher, build_http_client};
use coshub_core::changelog::{ChangelogService, ChangelogSettings};
use coshub_core::inline::InlineUploader;
use coshub_core::presign::PresignService;
use coshub_core::rehost::Rehoster;
use coshub_core::storage::{StorageConfig, StorageError, StorageService};
use coshub_shared::AppConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Object storage.
    pub storage: Arc<StorageService>,
    /// Presigned upload URL issuer.
    pub presign: Arc<PresignService>,
    /// Base64 image uploader.
    pub inline: Arc<InlineUploader>,
    /// HTML image rehoster.
    pub rehoster: Arc<Rehoster<HttpImageFetcher>>,
    /// Changelog scraper, absent when no renderer is configured.
    pub changelog: Option<Arc<ChangelogService<BrowserlessRenderer>>>,
}

/// Errors raised while wiring the application state.
#[derive(Debug, Error)]
pub enum StateError {
    /// Storage configuration is incomplete or the operator failed to build.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Outbound HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl AppState {
    /// Build every service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if storage settings are incomplete or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, StateError> {
        let storage_config = StorageConfig::from_settings(&config.storage)?;
        let storage = Arc::new(StorageService::from_config(storage_config)?);
        info!(
            provider = storage.provider_name(),
            bucket = storage.bucket(),
            "Storage configured"
        );

        let client = build_http_client(
            Duration::from_secs(config.http.timeout_secs),
            &config.http.user_agent,
        )?;

        let changelog = config.changelog.browserless_url.as_ref().map(|endpoint| {
            info!(endpoint = %endpoint, "Changelog renderer configured");
            Arc::new(ChangelogService::new(
                Arc::new(BrowserlessRenderer::new(client.clone(), endpoint.clone())),
                ChangelogSettings::from_config(&config.changelog, config.http.user_agent.clone()),
            ))
        });

        Ok(Self::new(
            storage,
            HttpImageFetcher::new(client, config.http.max_image_bytes),
            changelog,
            &config.inline.folder,
            &config.inline.prefix,
        ))
    }

    /// Assemble the state around an existing storage service.
    #[must_use]
    pub fn new(
        storage: Arc<StorageService>,
        fetcher: HttpImageFetcher,
        changelog: Option<Arc<ChangelogService<BrowserlessRenderer>>>,
        inline_folder: &str,
        inline_prefix: &str,
    ) -> Self {
        Self {
            presign: Arc::new(PresignService::new(Arc::clone(&storage))),
            inline: Arc::new(InlineUploader::new(
                Arc::clone(&storage),
                inline_folder,
                inline_prefix,
            )),
            rehoster: Arc::new(Rehoster::new(Arc::clone(&storage), Arc::new(fetcher))),
            storage,
            changelog,
        }
    }
}

/// Creates the main application router.
///
/// JSON bodies larger than `max_body_bytes` are rejected with a 413
/// envelope; unknown paths get a 404 envelope.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
