//! Route definitions for image generation.

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Routes mounted at `/generate-image`.
///
/// ```text
/// POST /         -> generate_image
/// POST /preview  -> preview_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(generation::generate_image))
        .route("/preview", post(generation::preview_image))
}
