use std::sync::Arc;

use moodasset_imagegen::storage::BlobStorage;
use moodasset_imagegen::ImageGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: moodasset_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Image acquisition chain.
    pub generator: Arc<ImageGenerator>,
    /// Storage bucket for mirrored images, when configured.
    pub storage: Option<BlobStorage>,
    /// Client for image export downloads (see [`crate::export::build_client`]).
    pub export_http: reqwest::Client,
}
