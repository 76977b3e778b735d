//! Image downloads over HTTP.

use bytes::{Bytes, BytesMut};
use coshub_core::rehost::{FetchError, FetchedImage, ImageFetcher};
use tracing::debug;

/// Downloads images with a shared reqwest client.
#[derive(Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpImageFetcher {
    /// Create a new fetcher that refuses bodies larger than `max_bytes`.
    #[must_use]
    pub fn new(client: reqwest::Client, max_bytes: usize) -> Self {
        Self { client, max_bytes }
    }

    fn too_large(&self, url: &str) -> FetchError {
        FetchError(format!("{url} exceeds {} bytes", self.max_bytes))
    }
}

impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError(e.to_string()))?;

        let status = response.status().as_u16();
        debug!(url, status, "Image response received");

        // the rehoster discards anything but 200, skip reading the body
        if status != 200 {
            return Ok(FetchedImage {
                status,
                body: Bytes::new(),
            });
        }

        if let Some(len) = response.content_length()
            && len > u64::try_from(self.max_bytes).unwrap_or(u64::MAX)
        {
            return Err(self.too_large(url));
        }

        // content-length may be absent or wrong, so the cap is enforced per chunk
        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError(e.to_string()))?
        {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(self.too_large(url));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchedImage {
            status,
            body: body.freeze(),
        })
    }
}
