//! HTTP mapping of application errors.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use coshub_core::changelog::ChangelogError;
use coshub_core::inline::InlineError;
use coshub_core::presign::PresignError;
use coshub_core::rehost::RehostError;
use coshub_shared::AppError;

use crate::response::failure;

/// Error returned by handlers; renders as an envelope with `data: null`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_client_error() {
            warn!(code = err.error_code(), error = %err, "Request rejected");
        } else {
            error!(code = err.error_code(), error = %err, "Request failed");
        }

        (status, Json(failure(status.as_u16(), err.to_string()))).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self(AppError::PayloadTooLarge(rejection.body_text()))
        } else {
            Self(AppError::Validation(rejection.body_text()))
        }
    }
}

impl From<PresignError> for ApiError {
    fn from(err: PresignError) -> Self {
        if err.is_client_error() {
            Self(AppError::Validation(err.to_string()))
        } else {
            Self(AppError::Storage(err.to_string()))
        }
    }
}

impl From<InlineError> for ApiError {
    fn from(err: InlineError) -> Self {
        if err.is_client_error() {
            Self(AppError::Validation(err.to_string()))
        } else {
            Self(AppError::Storage(err.to_string()))
        }
    }
}

impl From<RehostError> for ApiError {
    fn from(err: RehostError) -> Self {
        if err.is_client_error() {
            Self(AppError::Validation(err.to_string()))
        } else {
            Self(AppError::Internal(err.to_string()))
        }
    }
}

impl From<ChangelogError> for ApiError {
    fn from(err: ChangelogError) -> Self {
        match err {
            ChangelogError::Renderer(_) => Self(AppError::ExternalService(err.to_string())),
            ChangelogError::Selector(_) => Self(AppError::Internal(err.to_string())),
        }
    }
}
