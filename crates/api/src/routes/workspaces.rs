//! Route definitions for the workspace catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::workspaces;
use crate::state::AppState;

/// Routes mounted at `/workspaces`.
///
/// ```text
/// GET /               -> list_workspaces
/// GET /{key}          -> get_workspace
/// GET /{key}/assets   -> list_workspace_assets
/// GET /{key}/count    -> count_workspace_assets
/// GET /{key}/gallery  -> get_gallery
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workspaces::list_workspaces))
        .route("/{key}", get(workspaces::get_workspace))
        .route("/{key}/assets", get(workspaces::list_workspace_assets))
        .route("/{key}/count", get(workspaces::count_workspace_assets))
        .route("/{key}/gallery", get(workspaces::get_gallery))
}
