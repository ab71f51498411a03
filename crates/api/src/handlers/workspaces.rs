//! Handlers for the workspace catalog and per-workspace views.
//!
//! Workspaces are addressed by their short key (`analog`, `metal`, ...).

use axum::extract::{Path, State};
use axum::Json;
use moodasset_core::error::CoreError;
use moodasset_core::workspace::WorkspaceKey;
use moodasset_db::models::asset::{Asset, AssetCard};
use moodasset_db::models::workspace::{Workspace, WorkspaceAssetCount};
use moodasset_db::repositories::{AssetRepo, WorkspaceRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const FETCH_WORKSPACES_FAILED: &str = "Failed to fetch workspaces";
const FETCH_ASSETS_FAILED: &str = "Failed to fetch assets";

/// Payload behind a workspace gallery page.
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub workspace: Workspace,
    /// Generation style used for new assets in this workspace.
    pub style: &'static str,
    pub assets: Vec<AssetCard>,
}

/// Parse the key and load its workspace row.
///
/// Unknown keys are a validation error; a known key with no row is 404.
async fn resolve_workspace(state: &AppState, key: &str) -> AppResult<(WorkspaceKey, Workspace)> {
    let parsed = WorkspaceKey::parse(key)?;
    let workspace = WorkspaceRepo::find_by_key(&state.pool, parsed)
        .await
        .map_err(|e| AppError::from_operation(FETCH_WORKSPACES_FAILED, e))?
        .ok_or_else(|| CoreError::not_found("Workspace", key))?;
    Ok((parsed, workspace))
}

/// GET /api/workspaces
pub async fn list_workspaces(State(state): State<AppState>) -> AppResult<Json<Vec<Workspace>>> {
    let workspaces = WorkspaceRepo::list(&state.pool)
        .await
        .map_err(|e| AppError::from_operation(FETCH_WORKSPACES_FAILED, e))?;
    Ok(Json(workspaces))
}

/// GET /api/workspaces/{key}
pub async fn get_workspace(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<Workspace>> {
    let (_, workspace) = resolve_workspace(&state, &key).await?;
    Ok(Json(workspace))
}

/// GET /api/workspaces/{key}/assets
///
/// The workspace's assets, newest first.
pub async fn list_workspace_assets(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<Vec<Asset>>> {
    let (_, workspace) = resolve_workspace(&state, &key).await?;
    let assets = AssetRepo::list_for_workspace(&state.pool, workspace.id)
        .await
        .map_err(|e| AppError::from_operation(FETCH_ASSETS_FAILED, e))?;
    Ok(Json(assets))
}

/// GET /api/workspaces/{key}/count
pub async fn count_workspace_assets(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<WorkspaceAssetCount>> {
    let (_, workspace) = resolve_workspace(&state, &key).await?;
    let count = AssetRepo::count_for_workspace(&state.pool, workspace.id)
        .await
        .map_err(|e| AppError::from_operation(FETCH_ASSETS_FAILED, e))?;
    Ok(Json(WorkspaceAssetCount {
        workspace_id: workspace.id,
        count,
    }))
}

/// GET /api/workspaces/{key}/gallery
///
/// Workspace row plus display-ready asset cards for the gallery page.
pub async fn get_gallery(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<GalleryResponse>> {
    let (parsed, workspace) = resolve_workspace(&state, &key).await?;
    let assets = AssetRepo::list_for_workspace(&state.pool, workspace.id)
        .await
        .map_err(|e| AppError::from_operation(FETCH_ASSETS_FAILED, e))?;
    let cards = assets
        .iter()
        .map(|a| AssetCard::from_asset(a, parsed.as_str()))
        .collect();

    Ok(Json(GalleryResponse {
        workspace,
        style: parsed.style().as_str(),
        assets: cards,
    }))
}
