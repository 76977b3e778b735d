//! Rehost request, report and fetch types.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Downloaded image.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// HTTP status of the download.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

/// How rehosted objects are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RehostMode {
    /// `<YYYYmmddHHMMSS>_<index>.<ext>`; every occurrence is uploaded.
    Sequential,
    /// `<md5>.<ext>`; identical bytes map to one object.
    ContentHash,
}

/// Incoming rehost request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RehostRequest {
    /// HTML fragment to process.
    #[serde(default)]
    pub html: Option<String>,
    /// Page title, echoed back.
    #[serde(default)]
    pub title: Option<String>,
    /// Page URL, echoed back.
    #[serde(default)]
    pub url: Option<String>,
}

/// Outcome for one rehosted image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    /// Original `src`.
    pub old_url: String,
    /// Public URL of the stored copy.
    pub new_url: String,
    /// Size in bytes.
    pub size: usize,
    /// Hex md5 of the bytes (content-hash mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    /// Whether this request uploaded the object (content-hash mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

/// Result of processing one HTML fragment.
#[derive(Debug, Clone, Serialize)]
pub struct RehostReport {
    /// Echoed page title.
    pub title: Option<String>,
    /// Echoed page URL.
    pub url: Option<String>,
    /// HTML with rewritten image sources.
    pub html: String,
    /// One record per rehosted image, in document order.
    pub processed_images: Vec<ImageRecord>,
    /// `processed_images.len()`.
    pub total_processed: usize,
}
