//! The `{code, data, msg}` response envelope.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Body of every API response.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// HTTP status code, repeated in the body.
    pub code: u16,
    /// Payload, `null` on errors.
    pub data: T,
    /// Human-readable outcome.
    pub msg: String,
}

/// Wrap `data` in a 200 envelope.
pub fn success<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        code: StatusCode::OK.as_u16(),
        data,
        msg: "success".to_string(),
    })
}

/// Envelope with a `null` payload.
#[must_use]
pub fn failure(code: u16, msg: impl Into<String>) -> Envelope<()> {
    Envelope {
        code,
        data: (),
        msg: msg.into(),
    }
}
