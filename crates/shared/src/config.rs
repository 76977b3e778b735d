//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Outbound HTTP client configuration.
    #[serde(default)]
    pub http: HttpConfig,
    /// Changelog scraper configuration.
    #[serde(default)]
    pub changelog: ChangelogConfig,
    /// Base64 image upload configuration.
    #[serde(default)]
    pub inline: InlineConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    20 * 1024 * 1024
}

/// Which storage backend to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Tencent COS through its S3-compatible endpoint.
    #[default]
    Cos,
    /// Any other S3-compatible endpoint.
    S3,
    /// Local filesystem (development only).
    Fs,
    /// In-process memory (tests only).
    Memory,
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Backend selector.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Region, e.g. `ap-guangzhou`.
    #[serde(default)]
    pub region: String,
    /// Bucket name, e.g. `assets-1250000000`.
    #[serde(default)]
    pub bucket: String,
    /// Access key / SecretId.
    #[serde(default)]
    pub secret_id: String,
    /// Secret key / SecretKey.
    #[serde(default)]
    pub secret_key: String,
    /// Endpoint for the generic S3 backend.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Root directory for the filesystem backend.
    #[serde(default)]
    pub root: Option<String>,
    /// CDN base URL used for public links instead of the bucket domain.
    #[serde(default)]
    pub public_base_url: Option<String>,
    /// Presigned upload URL lifetime in seconds.
    #[serde(default = "default_presign_ttl")]
    pub presign_ttl_secs: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            region: String::new(),
            bucket: String::new(),
            secret_id: String::new(),
            secret_key: String::new(),
            endpoint: None,
            root: None,
            public_base_url: None,
            presign_ttl_secs: default_presign_ttl(),
        }
    }
}

fn default_presign_ttl() -> u64 {
    120
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent sent with image downloads and render requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Largest image the rehoster downloads, in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_image_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/81.0.4044.122 Safari/537.36 Edg/81.0.416.64"
        .to_string()
}

/// Changelog scraper configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangelogConfig {
    /// Headless-browser rendering endpoint. The route is disabled without it.
    #[serde(default)]
    pub browserless_url: Option<String>,
    /// Page to render.
    #[serde(default = "default_page_url")]
    pub page_url: String,
    /// CSS selector of the article body.
    #[serde(default = "default_container_selector")]
    pub container_selector: String,
    /// Class that marks a section heading inside the body.
    #[serde(default = "default_heading_class")]
    pub heading_class: String,
    /// Navigation timeout passed to the renderer, in milliseconds.
    #[serde(default = "default_goto_timeout")]
    pub goto_timeout_ms: u64,
    /// Navigation completion condition passed to the renderer.
    #[serde(default = "default_wait_until")]
    pub wait_until: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            browserless_url: None,
            page_url: default_page_url(),
            container_selector: default_container_selector(),
            heading_class: default_heading_class(),
            goto_timeout_ms: default_goto_timeout(),
            wait_until: default_wait_until(),
        }
    }
}

fn default_page_url() -> String {
    "https://www.feishu.cn/hc/zh-CN/articles/360049067483".to_string()
}

fn default_container_selector() -> String {
    "div.heraAdit-articleBody.js-heraAdit-richText-body".to_string()
}

fn default_heading_class() -> String {
    "heading-h3".to_string()
}

fn default_goto_timeout() -> u64 {
    20_000
}

fn default_wait_until() -> String {
    "networkidle2".to_string()
}

/// Base64 image upload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InlineConfig {
    /// Folder the decoded images land in.
    #[serde(default = "default_inline_folder")]
    pub folder: String,
    /// Filename prefix placed before the generated UUID.
    #[serde(default = "default_inline_prefix")]
    pub prefix: String,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            folder: default_inline_folder(),
            prefix: default_inline_prefix(),
        }
    }
}

fn default_inline_folder() -> String {
    "xmind".to_string()
}

fn default_inline_prefix() -> String {
    "zapier_".to_string()
}

/// Variables the function deployments were configured with. The first one
/// that is set and non-empty wins over file and `COSHUB__*` values.
const LEGACY_ENV: &[(&str, &[&str])] = &[
    ("storage.secret_id", &["COS_SECRET_ID", "SecretId"]),
    ("storage.secret_key", &["COS_SECRET_KEY", "SecretKey"]),
    ("storage.region", &["COS_REGION", "region"]),
    ("storage.bucket", &["COS_BUCKET_NAME", "Bucket"]),
    ("storage.public_base_url", &["CDNURL"]),
    ("changelog.browserless_url", &["BROWSERLESS_URL"]),
];

fn legacy_value(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
}

impl AppConfig {
    /// Loads configuration from config files, `COSHUB__*` variables and the
    /// legacy COS variable names.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COSHUB").separator("__"));

        for (key, names) in LEGACY_ENV {
            builder = builder.set_override_option(*key, legacy_value(names))?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_NAMES: &[&str] = &[
        "COS_SECRET_ID",
        "SecretId",
        "COS_SECRET_KEY",
        "SecretKey",
        "COS_REGION",
        "region",
        "COS_BUCKET_NAME",
        "Bucket",
        "CDNURL",
        "BROWSERLESS_URL",
    ];

    fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
        LEGACY_NAMES.iter().map(|name| (*name, None)).collect()
    }

    #[test]
    fn test_defaults_without_environment() {
        temp_env::with_vars(cleared(), || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.storage.backend, StorageBackend::Cos);
            assert_eq!(config.storage.presign_ttl_secs, 120);
            assert_eq!(config.http.timeout_secs, 30);
            assert_eq!(config.http.max_image_bytes, 20 * 1024 * 1024);
            assert_eq!(config.changelog.heading_class, "heading-h3");
            assert_eq!(config.changelog.goto_timeout_ms, 20_000);
            assert!(config.changelog.browserless_url.is_none());
            assert_eq!(config.inline.folder, "xmind");
            assert_eq!(config.inline.prefix, "zapier_");
        });
    }

    #[test]
    fn test_cos_variables_override() {
        let mut vars = cleared();
        vars.extend([
            ("COS_SECRET_ID", Some("AKIDexample")),
            ("COS_SECRET_KEY", Some("secret")),
            ("COS_REGION", Some("ap-guangzhou")),
            ("COS_BUCKET_NAME", Some("assets-1250000000")),
            ("CDNURL", Some("https://cdn.example.com")),
            ("BROWSERLESS_URL", Some("http://render.local/content")),
        ]);

        temp_env::with_vars(vars, || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.storage.secret_id, "AKIDexample");
            assert_eq!(config.storage.secret_key, "secret");
            assert_eq!(config.storage.region, "ap-guangzhou");
            assert_eq!(config.storage.bucket, "assets-1250000000");
            assert_eq!(
                config.storage.public_base_url.as_deref(),
                Some("https://cdn.example.com")
            );
            assert_eq!(
                config.changelog.browserless_url.as_deref(),
                Some("http://render.local/content")
            );
        });
    }

    #[test]
    fn test_short_legacy_names_used_as_fallback() {
        let mut vars = cleared();
        vars.extend([
            ("SecretId", Some("short-id")),
            ("Bucket", Some("short-bucket")),
            ("region", Some("ap-shanghai")),
        ]);

        temp_env::with_vars(vars, || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.storage.secret_id, "short-id");
            assert_eq!(config.storage.bucket, "short-bucket");
            assert_eq!(config.storage.region, "ap-shanghai");
        });
    }

    #[test]
    fn test_prefixed_variables() {
        let mut vars = cleared();
        vars.extend([
            ("COSHUB__SERVER__PORT", Some("9090")),
            ("COSHUB__STORAGE__BACKEND", Some("memory")),
            ("COSHUB__STORAGE__PRESIGN_TTL_SECS", Some("300")),
        ]);

        temp_env::with_vars(vars, || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.storage.backend, StorageBackend::Memory);
            assert_eq!(config.storage.presign_ttl_secs, 300);
        });
    }

    #[test]
    fn test_empty_legacy_value_is_ignored() {
        let mut vars = cleared();
        vars.extend([("COS_BUCKET_NAME", Some("")), ("Bucket", Some("fallback"))]);

        temp_env::with_vars(vars, || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.storage.bucket, "fallback");
        });
    }
}
