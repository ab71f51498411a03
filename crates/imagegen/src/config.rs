//! Environment-driven settings for upstream image services and storage.

use std::time::Duration;

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_STORAGE_BUCKET: &str = "asset-images";

/// Upstream API settings for the image acquisition chain.
///
/// A strategy is only enabled when the key it needs is present.
#[derive(Debug, Clone)]
pub struct ImageGenConfig {
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub unsplash_access_key: Option<String>,
    pub unsplash_base_url: String,
    /// Timeout applied to every outbound call (default: `60`).
    pub upstream_timeout_secs: u64,
}

impl ImageGenConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                         |
    /// |-------------------------|---------------------------------|
    /// | `OPENROUTER_API_KEY`    | unset (AI strategies disabled)  |
    /// | `OPENROUTER_BASE_URL`   | `https://openrouter.ai/api/v1`  |
    /// | `UNSPLASH_ACCESS_KEY`   | unset (stock search disabled)   |
    /// | `UNSPLASH_BASE_URL`     | `https://api.unsplash.com`      |
    /// | `UPSTREAM_TIMEOUT_SECS` | `60`                            |
    pub fn from_env() -> Self {
        let upstream_timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        Self {
            openrouter_api_key: non_empty_var("OPENROUTER_API_KEY"),
            openrouter_base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENROUTER_BASE_URL.into()),
            unsplash_access_key: non_empty_var("UNSPLASH_ACCESS_KEY"),
            unsplash_base_url: std::env::var("UNSPLASH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_UNSPLASH_BASE_URL.into()),
            upstream_timeout_secs,
        }
    }

    /// Configuration with every upstream disabled.
    pub fn disabled() -> Self {
        Self {
            openrouter_api_key: None,
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.into(),
            unsplash_access_key: None,
            unsplash_base_url: DEFAULT_UNSPLASH_BASE_URL.into(),
            upstream_timeout_secs: 60,
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Build the shared HTTP client used for all upstream calls.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(self.upstream_timeout())
            .build()
    }
}

/// Storage bucket settings for mirroring acquired images.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the storage service, without trailing slash.
    pub url: String,
    pub service_key: String,
    pub bucket: String,
    /// Mirror generated images into the bucket before persisting the asset.
    pub mirror_images: bool,
}

impl StorageConfig {
    /// Load storage settings. Returns `None` when `STORAGE_URL` or
    /// `STORAGE_SERVICE_KEY` is unset.
    ///
    /// | Env Var                 | Default         |
    /// |-------------------------|-----------------|
    /// | `STORAGE_URL`           | unset           |
    /// | `STORAGE_SERVICE_KEY`   | unset           |
    /// | `STORAGE_BUCKET`        | `asset-images`  |
    /// | `STORAGE_MIRROR_IMAGES` | `false`         |
    pub fn from_env() -> Option<Self> {
        let url = non_empty_var("STORAGE_URL")?;
        let service_key = non_empty_var("STORAGE_SERVICE_KEY")?;
        let bucket =
            std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_STORAGE_BUCKET.into());
        let mirror_images = std::env::var("STORAGE_MIRROR_IMAGES")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Some(Self {
            url: url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
            mirror_images,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
