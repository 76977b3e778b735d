//! Storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use coshub_shared::{StorageBackend, StorageSettings};

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// Tencent Cloud Object Storage, addressed through its S3-compatible API.
    Cos {
        /// COS region, e.g. `ap-guangzhou`.
        region: String,
        /// Bucket name including the APPID suffix.
        bucket: String,
        /// SecretId.
        secret_id: String,
        /// SecretKey.
        secret_key: String,
    },
    /// Any other S3-compatible storage.
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory (tests only)
    Memory,
}

impl StorageProvider {
    /// Create a Tencent COS provider.
    #[must_use]
    pub fn cos(
        region: impl Into<String>,
        bucket: impl Into<String>,
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self::Cos {
            region: region.into(),
            bucket: bucket.into(),
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Create a generic S3-compatible provider.
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cos { .. } => "cos",
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::Cos { bucket, .. } | Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
            Self::Memory => "memory",
        }
    }

    /// Base URL objects of this provider are publicly reachable under.
    #[must_use]
    pub fn default_public_base(&self) -> String {
        match self {
            Self::Cos { region, bucket, .. } => {
                format!("https://{bucket}.cos.{region}.myqcloud.com")
            }
            Self::S3 {
                endpoint, bucket, ..
            } => format!("{}/{bucket}", endpoint.trim_end_matches('/')),
            Self::LocalFs { root } => format!("file://{}", root.display()),
            Self::Memory => "memory://memory".to_string(),
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Presigned upload URL TTL in seconds.
    pub presign_ttl_secs: u64,
    /// CDN base URL overriding the provider's public base.
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    /// Default upload TTL: 2 minutes.
    pub const DEFAULT_PRESIGN_TTL: u64 = 120;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            presign_ttl_secs: Self::DEFAULT_PRESIGN_TTL,
            public_base_url: None,
        }
    }

    /// Set presigned upload URL TTL.
    #[must_use]
    pub fn with_presign_ttl(mut self, secs: u64) -> Self {
        self.presign_ttl_secs = secs;
        self
    }

    /// Serve public links from a CDN instead of the bucket domain.
    #[must_use]
    pub fn with_public_base_url(mut self, base: impl Into<String>) -> Self {
        self.public_base_url = Some(base.into());
        self
    }

    /// Build the storage config from loaded application settings.
    ///
    /// # Errors
    ///
    /// Returns an error when a setting required by the selected backend is missing.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let provider = match settings.backend {
            StorageBackend::Cos => {
                require("storage.region", &settings.region)?;
                require("storage.bucket", &settings.bucket)?;
                StorageProvider::cos(
                    &settings.region,
                    &settings.bucket,
                    &settings.secret_id,
                    &settings.secret_key,
                )
            }
            StorageBackend::S3 => {
                let endpoint = settings
                    .endpoint
                    .as_deref()
                    .ok_or_else(|| StorageError::configuration("storage.endpoint is required"))?;
                require("storage.bucket", &settings.bucket)?;
                StorageProvider::s3(
                    endpoint,
                    &settings.bucket,
                    &settings.secret_id,
                    &settings.secret_key,
                    &settings.region,
                )
            }
            StorageBackend::Fs => {
                let root = settings
                    .root
                    .as_deref()
                    .ok_or_else(|| StorageError::configuration("storage.root is required"))?;
                StorageProvider::local_fs(root)
            }
            StorageBackend::Memory => StorageProvider::Memory,
        };

        let mut config = Self::new(provider).with_presign_ttl(settings.presign_ttl_secs);
        if let Some(base) = settings.public_base_url.as_deref().filter(|b| !b.is_empty()) {
            config = config.with_public_base_url(base);
        }
        Ok(config)
    }

    /// Base URL used to build public object links.
    #[must_use]
    pub fn public_base(&self) -> String {
        self.public_base_url
            .as_deref()
            .map_or_else(
                || self.provider.default_public_base(),
                |base| base.trim_end_matches('/').to_string(),
            )
    }
}

fn require(name: &str, value: &str) -> Result<(), StorageError> {
    if value.is_empty() {
        return Err(StorageError::configuration(format!("{name} is required")));
    }
    Ok(())
}
