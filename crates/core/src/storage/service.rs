//! Storage service implementation using Apache OpenDAL.

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use opendal::{Builder, ErrorKind, Operator, services};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Presigned URL for a direct upload.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL.
    pub url: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
}

/// Storage service for the bucket.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::Cos {
                region,
                bucket,
                secret_id,
                secret_key,
            } => {
                // COS only accepts virtual-hosted addressing on its S3 endpoint.
                let builder = services::S3::default()
                    .endpoint(&format!("https://cos.{region}.myqcloud.com"))
                    .bucket(bucket)
                    .region(region)
                    .access_key_id(secret_id)
                    .secret_access_key(secret_key)
                    .enable_virtual_host_style()
                    .disable_config_load()
                    .disable_ec2_metadata();

                finish(builder)
            }
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region)
                    .disable_config_load()
                    .disable_ec2_metadata();

                finish(builder)
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                finish(builder)
            }
            StorageProvider::Memory => finish(services::Memory::default()),
        }
    }

    /// Write an object, replacing any existing object under the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        // Backends without content-type support reject the option outright.
        let typed = self
            .operator
            .info()
            .full_capability()
            .write_with_content_type;

        match content_type.filter(|_| typed) {
            Some(content_type) => self
                .operator
                .write_with(key, body)
                .content_type(content_type)
                .await
                .map(|_| ())
                .map_err(StorageError::from),
            None => self
                .operator
                .write(key, body)
                .await
                .map(|_| ())
                .map_err(StorageError::from),
        }
    }

    /// Check if an object exists in storage.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the object being absent.
    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self.operator.stat(key).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    /// Generate a presigned PUT URL for `key`, valid for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns an error if presigning is not supported or fails.
    pub async fn presign_put(&self, key: &str) -> Result<PresignedUrl, StorageError> {
        let ttl = Duration::from_secs(self.config.presign_ttl_secs);

        let presigned = self
            .operator
            .presign_write(key, ttl)
            .await
            .map_err(StorageError::from)?;

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            expires_at: Utc::now()
                + chrono::Duration::seconds(
                    i64::try_from(self.config.presign_ttl_secs).unwrap_or(i64::MAX),
                ),
        })
    }

    /// Deterministic public URL of `key`.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.config.public_base(), key.trim_start_matches('/'))
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }
}

fn finish<B: Builder>(builder: B) -> Result<Operator, StorageError> {
    Ok(Operator::new(builder)
        .map_err(|e| StorageError::configuration(e.to_string()))?
        .finish())
}
