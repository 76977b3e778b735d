//! Core logic for Coshub.
//!
//! This crate contains the upload and scraping logic with no web framework
//! or HTTP client dependency. Network collaborators are reached through the
//! [`rehost::ImageFetcher`] and [`changelog::PageRenderer`] traits.
//!
//! # Modules
//!
//! - `storage` - Bucket access through OpenDAL
//! - `classify` - Extension to folder classification of object keys
//! - `presign` - Presigned upload URLs
//! - `rehost` - Rehosting of images referenced from HTML
//! - `inline` - Base64 image uploads
//! - `changelog` - Changelog page scraping

pub mod changelog;
pub mod classify;
pub mod inline;
pub mod presign;
pub mod rehost;
pub mod storage;
