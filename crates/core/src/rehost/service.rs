//! Rehost service implementation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::error::{FetchError, ImageError, RehostError};
use super::html::{collect_image_sources, is_remote, rewrite_image_sources, url_path};
use super::types::{FetchedImage, ImageRecord, RehostMode, RehostReport, RehostRequest};
use crate::classify::{FileCategory, dated_prefix, extension_of};
use crate::storage::StorageService;

/// Extension assumed when the image URL path has none.
const DEFAULT_EXTENSION: &str = "jpg";

/// Downloads images for the rehoster.
///
/// This trait is implemented by the clients crate with a real HTTP client.
pub trait ImageFetcher: Send + Sync {
    /// Download `url`. Non-200 answers are returned, not treated as errors.
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<FetchedImage, FetchError>> + Send;
}

/// Rehosts the images of an HTML fragment into the bucket.
pub struct Rehoster<F: ImageFetcher> {
    storage: Arc<StorageService>,
    fetcher: Arc<F>,
}

impl<F: ImageFetcher> Rehoster<F> {
    /// Create a new rehoster.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, fetcher: Arc<F>) -> Self {
        Self { storage, fetcher }
    }

    /// Rehost every remote `<img>` of `request.html`.
    ///
    /// Images are processed one after another in document order. A failing
    /// image is logged and left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `html` is missing or the HTML cannot be rewritten.
    pub async fn rehost(
        &self,
        request: RehostRequest,
        mode: RehostMode,
        now: DateTime<Utc>,
    ) -> Result<RehostReport, RehostError> {
        let html = request
            .html
            .filter(|html| !html.is_empty())
            .ok_or(RehostError::MissingHtml)?;

        let sources = collect_image_sources(&html)?;
        let mut records: Vec<ImageRecord> = Vec::new();
        let mut replacements = HashMap::new();

        for source in sources.into_iter().filter(|s| is_remote(&s.src)) {
            match self.rehost_one(&source.src, records.len(), mode, now).await {
                Ok(record) => {
                    info!(
                        old_url = %record.old_url,
                        new_url = %record.new_url,
                        size = record.size,
                        "Image rehosted"
                    );
                    replacements.insert(source.ordinal, record.new_url.clone());
                    records.push(record);
                }
                Err(e) if e.is_expected() => {
                    warn!(src = %source.src, error = %e, "Skipping image");
                }
                Err(e) => {
                    error!(src = %source.src, error = %e, "Failed to process image");
                }
            }
        }

        let html = if replacements.is_empty() {
            html
        } else {
            rewrite_image_sources(&html, &replacements)?
        };

        Ok(RehostReport {
            title: request.title,
            url: request.url,
            html,
            total_processed: records.len(),
            processed_images: records,
        })
    }

    async fn rehost_one(
        &self,
        src: &str,
        index: usize,
        mode: RehostMode,
        now: DateTime<Utc>,
    ) -> Result<ImageRecord, ImageError> {
        let image = self.fetcher.fetch(src).await?;
        if image.status != 200 {
            return Err(ImageError::Status(image.status));
        }

        let ext = image_extension(src)?;
        let prefix = dated_prefix(FileCategory::Image.folder(), now);
        let content_type = image_mime(&ext);
        let size = image.body.len();

        match mode {
            RehostMode::Sequential => {
                let key = format!("{prefix}{}_{index}.{ext}", now.format("%Y%m%d%H%M%S"));
                self.storage
                    .put(&key, image.body, Some(content_type))
                    .await?;

                Ok(ImageRecord {
                    old_url: src.to_string(),
                    new_url: self.storage.public_url(&key),
                    size,
                    md5: None,
                    is_new: None,
                })
            }
            RehostMode::ContentHash => {
                let digest = format!("{:x}", md5::compute(&image.body));
                let key = format!("{prefix}{digest}.{ext}");

                let is_new = !self.storage.exists(&key).await?;
                if is_new {
                    self.storage
                        .put(&key, image.body, Some(content_type))
                        .await?;
                }

                Ok(ImageRecord {
                    old_url: src.to_string(),
                    new_url: self.storage.public_url(&key),
                    size,
                    md5: Some(digest),
                    is_new: Some(is_new),
                })
            }
        }
    }
}

/// Lowercased image extension of a URL, `jpg` when the path has none.
fn image_extension(src: &str) -> Result<String, ImageError> {
    let ext = extension_of(url_path(src))
        .unwrap_or(DEFAULT_EXTENSION)
        .to_ascii_lowercase();

    if FileCategory::from_extension(&ext) == FileCategory::Image {
        Ok(ext)
    } else {
        Err(ImageError::UnsupportedFormat(ext))
    }
}

fn image_mime(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "image/jpeg",
    }
}
