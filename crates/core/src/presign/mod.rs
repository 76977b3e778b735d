//! Presigned upload URL issuance.
//!
//! Two flavours exist:
//! - caller-named objects, classified into a dated folder by extension;
//! - extension tickets, where the object is named by upload time only.

mod error;
mod service;

pub use error::PresignError;
pub use service::{ExtensionTicket, PresignService, PresignedUpload};
