//! Inline upload implementation.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use super::error::InlineError;
use crate::storage::StorageService;

/// Content type every inline upload is stored with.
const CONTENT_TYPE: &str = "image/png";

/// Result of an inline upload.
#[derive(Debug, Clone, Serialize)]
pub struct InlineUpload {
    /// Public URL of the stored image.
    pub url: String,
    /// Object key.
    #[serde(skip)]
    pub object_key: String,
    /// Decoded size in bytes.
    #[serde(skip)]
    pub size: usize,
}

/// Decodes base64 images and stores them under a random name.
pub struct InlineUploader {
    storage: Arc<StorageService>,
    folder: String,
    prefix: String,
}

impl InlineUploader {
    /// Create a new uploader writing `<folder>/<prefix><uuid>.png` objects.
    #[must_use]
    pub fn new(
        storage: Arc<StorageService>,
        folder: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            folder: folder.into(),
            prefix: prefix.into(),
        }
    }

    /// Decode and upload `image`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is missing, not base64, or the upload fails.
    pub async fn upload(&self, image: Option<&str>) -> Result<InlineUpload, InlineError> {
        let encoded = image
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(InlineError::MissingImage)?;

        let data = decode_image(encoded)?;
        let key = format!(
            "{}/{}{}.png",
            self.folder.trim_matches('/'),
            self.prefix,
            Uuid::new_v4()
        );
        let size = data.len();

        self.storage
            .put(&key, Bytes::from(data), Some(CONTENT_TYPE))
            .await?;

        Ok(InlineUpload {
            url: self.storage.public_url(&key),
            object_key: key,
            size,
        })
    }
}

/// Decode standard base64, tolerating a `data:<mime>;base64,` prefix and
/// line breaks.
fn decode_image(encoded: &str) -> Result<Vec<u8>, InlineError> {
    let payload = match encoded.split_once(";base64,") {
        Some((head, rest)) if head.starts_with("data:") => rest,
        _ => encoded,
    };
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    STANDARD
        .decode(compact)
        .map_err(|e| InlineError::InvalidBase64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageConfig, StorageProvider};

    fn uploader() -> (InlineUploader, Arc<StorageService>) {
        let config = StorageConfig::new(StorageProvider::cos("ap-guangzhou", "b-1", "i", "k"))
            .with_public_base_url("https://b-1.cos.ap-guangzhou.myqcloud.com");
        // public links follow the COS layout while objects live in memory
        let memory = StorageConfig {
            provider: StorageProvider::Memory,
            ..config
        };
        let storage = Arc::new(StorageService::from_config(memory).expect("should create service"));
        (
            InlineUploader::new(Arc::clone(&storage), "xmind", "zapier_"),
            storage,
        )
    }

    #[tokio::test]
    async fn test_missing_image() {
        let (uploader, _) = uploader();
        for image in [None, Some(""), Some("   ")] {
            let err = uploader.upload(image).await.unwrap_err();
            assert!(matches!(err, InlineError::MissingImage));
            assert!(err.is_client_error());
        }
    }

    #[tokio::test]
    async fn test_invalid_base64() {
        let (uploader, _) = uploader();
        let err = uploader.upload(Some("not base64!!")).await.unwrap_err();
        assert!(matches!(err, InlineError::InvalidBase64(_)));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_upload_stores_png_under_uuid_name() {
        let (uploader, storage) = uploader();
        let encoded = STANDARD.encode(b"\x89PNG\r\n\x1a\nfake");

        let upload = uploader.upload(Some(&encoded)).await.expect("upload");

        assert!(upload.object_key.starts_with("xmind/zapier_"));
        assert!(upload.object_key.ends_with(".png"));
        let id = upload
            .object_key
            .trim_start_matches("xmind/zapier_")
            .trim_end_matches(".png");
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(upload.size, 12);
        assert_eq!(
            upload.url,
            format!(
                "https://b-1.cos.ap-guangzhou.myqcloud.com/{}",
                upload.object_key
            )
        );
        assert!(storage.exists(&upload.object_key).await.expect("stat"));
    }

    #[tokio::test]
    async fn test_each_upload_gets_a_new_key() {
        let (uploader, _) = uploader();
        let encoded = STANDARD.encode(b"same");
        let a = uploader.upload(Some(&encoded)).await.expect("upload");
        let b = uploader.upload(Some(&encoded)).await.expect("upload");
        assert_ne!(a.object_key, b.object_key);
    }

    #[test]
    fn test_decode_data_uri_and_whitespace() {
        let encoded = STANDARD.encode(b"hello world");
        let (head, tail) = encoded.split_at(6);
        let wrapped = format!("data:image/png;base64,{head}\n{tail}");
        assert_eq!(decode_image(&wrapped).expect("decode"), b"hello world");
    }
}
