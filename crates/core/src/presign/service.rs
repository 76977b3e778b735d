//! Presign service implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::PresignError;
use crate::classify::classified_key;
use crate::storage::StorageService;

/// Longest extension accepted for an extension ticket.
const MAX_EXTENSION_LEN: usize = 16;

/// Result of presigning a caller-named object.
#[derive(Debug, Clone, Serialize)]
pub struct PresignedUpload {
    /// Signed PUT URL, valid for the storage TTL.
    pub presigned_url: String,
    /// Public URL the object will be readable at once uploaded.
    pub view_url: String,
    /// Final object key, including the classification prefix.
    #[serde(skip)]
    pub object_key: String,
    /// When the presigned URL stops working.
    #[serde(skip)]
    pub expires_at: DateTime<Utc>,
}

/// Result of presigning an object named by timestamp and extension.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionTicket {
    /// Signed PUT URL.
    pub upload_url: String,
    /// Public URL the object will be readable at once uploaded.
    pub read_url: String,
    /// Object key, `<ext>/<unix millis>.<ext>`.
    #[serde(skip)]
    pub object_key: String,
}

/// Issues presigned upload URLs.
pub struct PresignService {
    storage: Arc<StorageService>,
}

impl PresignService {
    /// Create a new presign service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>) -> Self {
        Self { storage }
    }

    /// Presign an upload for `object_key`, placed under
    /// `<category folder>/<YYYY>/<MM>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or presigning fails.
    pub async fn issue(
        &self,
        object_key: &str,
        now: DateTime<Utc>,
    ) -> Result<PresignedUpload, PresignError> {
        if object_key.is_empty() {
            return Err(PresignError::MissingKey);
        }

        let key = classified_key(object_key, now);
        let presigned = self.storage.presign_put(&key).await?;

        Ok(PresignedUpload {
            presigned_url: presigned.url,
            view_url: self.storage.public_url(&key),
            object_key: key,
            expires_at: presigned.expires_at,
        })
    }

    /// Presign an upload for a new object named `<ext>/<unix millis>.<ext>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is invalid or presigning fails.
    pub async fn issue_for_extension(
        &self,
        extension: &str,
        now: DateTime<Utc>,
    ) -> Result<ExtensionTicket, PresignError> {
        let extension = extension.trim_start_matches('.');
        if !is_valid_extension(extension) {
            return Err(PresignError::InvalidExtension(extension.to_string()));
        }

        let key = format!("{extension}/{}.{extension}", now.timestamp_millis());
        let presigned = self.storage.presign_put(&key).await?;

        Ok(ExtensionTicket {
            upload_url: presigned.url,
            read_url: self.storage.public_url(&key),
            object_key: key,
        })
    }
}

fn is_valid_extension(ext: &str) -> bool {
    !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
}
