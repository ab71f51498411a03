pub mod assets;
pub mod auth;
pub mod generation;
pub mod health;
pub mod workspaces;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/session                        session check (requires token)
/// /auth/logout                         logout
///
/// /workspaces                          list
/// /workspaces/{key}                    get by short key
/// /workspaces/{key}/assets             assets, newest first
/// /workspaces/{key}/count              asset count
/// /workspaces/{key}/gallery            gallery page data
///
/// /assets                              recent (GET), create (POST)
/// /assets/{id}                         get, update, delete
/// /assets/{id}/export                  image download
///
/// /generate-image                      generate and store (POST)
/// /generate-image/preview              generate only (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/workspaces", workspaces::router())
        .nest("/assets", assets::router())
        .nest("/generate-image", generation::router())
}
