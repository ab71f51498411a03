use moodasset_core::assets::DEFAULT_RECENT_LIMIT;
use moodasset_imagegen::{ImageGenConfig, StorageConfig};

use crate::auth::jwt::JwtConfig;

const DEFAULT_EXPORT_MAX_BYTES: usize = 20 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`).
    pub request_timeout_secs: u64,
    /// Default size of the recent-assets listing (default: `10`).
    pub recent_assets_limit: i64,
    /// Largest image body the export endpoint will relay (default: 20 MiB).
    pub export_max_bytes: usize,
    /// Let exports fetch loopback and private-network hosts (default: `false`).
    pub export_allow_private_hosts: bool,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Upstream image service settings.
    pub imagegen: ImageGenConfig,
    /// Storage bucket settings; `None` disables mirroring.
    pub storage: Option<StorageConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`       | `120`                   |
    /// | `RECENT_ASSETS_LIMIT`        | `10`                    |
    /// | `EXPORT_MAX_BYTES`           | `20971520`              |
    /// | `EXPORT_ALLOW_PRIVATE_HOSTS` | `false`                 |
    ///
    /// JWT, image service and storage variables are documented on
    /// [`JwtConfig::from_env`], [`ImageGenConfig::from_env`] and
    /// [`StorageConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let recent_assets_limit: i64 = std::env::var("RECENT_ASSETS_LIMIT")
            .unwrap_or_else(|_| DEFAULT_RECENT_LIMIT.to_string())
            .parse()
            .expect("RECENT_ASSETS_LIMIT must be a valid i64");

        let export_max_bytes: usize = std::env::var("EXPORT_MAX_BYTES")
            .unwrap_or_else(|_| DEFAULT_EXPORT_MAX_BYTES.to_string())
            .parse()
            .expect("EXPORT_MAX_BYTES must be a valid usize");

        let export_allow_private_hosts: bool = std::env::var("EXPORT_ALLOW_PRIVATE_HOSTS")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("EXPORT_ALLOW_PRIVATE_HOSTS must be true or false");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            recent_assets_limit,
            export_max_bytes,
            export_allow_private_hosts,
            jwt: JwtConfig::from_env(),
            imagegen: ImageGenConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }
}
