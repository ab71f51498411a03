//! Route definitions for assets.

use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// GET    /             -> list_recent_assets (?limit=)
/// POST   /             -> create_asset
/// GET    /{id}         -> get_asset
/// PUT    /{id}         -> update_asset
/// DELETE /{id}         -> delete_asset
/// GET    /{id}/export  -> export_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(assets::list_recent_assets).post(assets::create_asset),
        )
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/{id}/export", get(assets::export_asset))
}
