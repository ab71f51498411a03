//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for listings capped on the server side.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
