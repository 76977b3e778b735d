//! Object storage for the bucket using Apache OpenDAL.
//!
//! Tencent COS is reached through its S3-compatible endpoint; the local
//! filesystem and in-memory backends exist for development and tests.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.write("key", data)      │ op.presign_write("key", duration)  │
//! │ op.stat("key")             │ public_url("key")                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{PresignedUrl, StorageService};
