//! Shared errors and configuration for Coshub.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management (config files, `COSHUB__*` and legacy COS variables)

pub mod config;
pub mod error;

pub use config::{
    AppConfig, ChangelogConfig, HttpConfig, InlineConfig, ServerConfig, StorageBackend,
    StorageSettings,
};
pub use error::AppError;
