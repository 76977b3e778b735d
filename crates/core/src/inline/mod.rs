//! Upload of base64-encoded images posted inline in a JSON body.

mod error;
mod service;

pub use error::InlineError;
pub use service::{InlineUpload, InlineUploader};
