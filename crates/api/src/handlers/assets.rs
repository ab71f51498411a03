//! Handlers for the `/assets` resource.
//!
//! Provides asset CRUD, the cross-workspace recent feed and image export.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use moodasset_core::assets::{
    clamp_recent_limit, create_metadata, export_file_name, missing_fields,
    update_metadata_patch, validate_image_url_update, validate_name_update,
};
use moodasset_core::error::CoreError;
use moodasset_core::types::DbId;
use moodasset_db::models::asset::{Asset, AssetWithWorkspace, CreateAsset, UpdateAsset};
use moodasset_db::repositories::AssetRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::export::{self, ExportError, ExportedImage};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::query::LimitParams;
use crate::state::AppState;

/// Content type used when the image host does not send one.
const DEFAULT_EXPORT_CONTENT_TYPE: &str = "image/png";

const FETCH_ASSETS_FAILED: &str = "Failed to fetch assets";
const FETCH_ASSET_FAILED: &str = "Failed to fetch asset";
const CREATE_FAILED: &str = "Failed to create asset";
const UPDATE_FAILED: &str = "Failed to update asset";
const DELETE_FAILED: &str = "Failed to delete asset";
const EXPORT_FAILED: &str = "Failed to export asset";

/// Request body for `POST /assets`. Every field but `metadata` is required.
#[derive(Debug, Deserialize)]
pub struct CreateAssetRequest {
    pub workspace_id: Option<String>,
    pub name: Option<String>,
    pub prompt: Option<String>,
    pub image_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load an asset or fail with 404.
async fn find_asset(state: &AppState, id: DbId) -> AppResult<Asset> {
    AssetRepo::find_by_id(&state.pool, id)
        .await
        .map_err(|e| AppError::from_operation(FETCH_ASSET_FAILED, e))?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Asset", id)))
}

/// Parse a workspace reference supplied as a string.
pub(crate) fn parse_workspace_id(raw: &str, field: &str) -> AppResult<DbId> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {field}: {raw}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/assets?limit=
///
/// Most recent assets across all workspaces, each with its workspace name.
pub async fn list_recent_assets(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> AppResult<Json<Vec<AssetWithWorkspace>>> {
    let limit = clamp_recent_limit(params.limit, state.config.recent_assets_limit);
    let assets = AssetRepo::list_recent(&state.pool, limit)
        .await
        .map_err(|e| AppError::from_operation(FETCH_ASSETS_FAILED, e))?;
    Ok(Json(assets))
}

/// POST /api/assets
///
/// Create an asset from explicit values. Returns 201 with the stored row.
pub async fn create_asset(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateAssetRequest>,
) -> AppResult<impl IntoResponse> {
    let missing = missing_fields(&[
        ("workspace_id", input.workspace_id.as_deref()),
        ("name", input.name.as_deref()),
        ("prompt", input.prompt.as_deref()),
        ("image_url", input.image_url.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(AppError::MissingFields {
            message: "Missing required fields",
            fields: missing,
        });
    }

    let workspace_id = input.workspace_id.unwrap_or_default();
    let create = CreateAsset {
        workspace_id: parse_workspace_id(&workspace_id, "workspace_id")?,
        name: input.name.unwrap_or_default(),
        prompt: input.prompt.unwrap_or_default(),
        image_url: input.image_url.unwrap_or_default(),
        metadata: create_metadata(input.metadata)?,
    };

    let asset = AssetRepo::create(&state.pool, &create)
        .await
        .map_err(|e| AppError::from_operation(CREATE_FAILED, e))?;

    tracing::info!(
        asset_id = %asset.id,
        workspace_id = %asset.workspace_id,
        name = %asset.name,
        "Asset created",
    );

    Ok((StatusCode::CREATED, Json(asset)))
}

/// GET /api/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<Asset>> {
    Ok(Json(find_asset(&state, id).await?))
}

/// PUT /api/assets/{id}
///
/// Apply supplied fields. Metadata keys are merged over the stored object
/// and `metadata.updated_at` is always stamped.
pub async fn update_asset(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateAsset>,
) -> AppResult<Json<Asset>> {
    validate_name_update(input.name.as_deref())?;
    validate_image_url_update(input.image_url.as_deref())?;

    let patch = UpdateAsset {
        name: input.name,
        prompt: input.prompt,
        image_url: input.image_url,
        metadata: Some(update_metadata_patch(input.metadata, chrono::Utc::now())?),
    };

    let asset = AssetRepo::update(&state.pool, id, &patch)
        .await
        .map_err(|e| AppError::from_operation(UPDATE_FAILED, e))?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Asset", id)))?;

    tracing::info!(asset_id = %asset.id, "Asset updated");

    Ok(Json(asset))
}

/// DELETE /api/assets/{id}
pub async fn delete_asset(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AssetRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::from_operation(DELETE_FAILED, e))?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Asset", id)));
    }
    tracing::info!(asset_id = %id, "Asset deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/assets/{id}/export
///
/// Download the asset's image through the server as an attachment named
/// after the asset. Non-public hosts are refused with 400.
pub async fn export_asset(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = find_asset(&state, id).await?;

    let image = fetch_export(&state, &asset.image_url)
        .await
        .map_err(|e| match e {
            ExportError::Rejected(_) => AppError::Core(CoreError::Validation(e.to_string())),
            other => AppError::Failed {
                message: EXPORT_FAILED,
                details: other.to_string(),
            },
        })?;

    let content_type = image
        .content_type
        .unwrap_or_else(|| DEFAULT_EXPORT_CONTENT_TYPE.to_string());
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(&asset.name)
    );

    tracing::info!(asset_id = %asset.id, size = image.bytes.len(), "Asset exported");

    Ok((
        [(CONTENT_TYPE, content_type), (CONTENT_DISPOSITION, disposition)],
        image.bytes,
    ))
}

async fn fetch_export(state: &AppState, image_url: &str) -> Result<ExportedImage, ExportError> {
    let url = export::check_url(image_url, state.config.export_allow_private_hosts).await?;
    export::download(&state.export_http, url, state.config.export_max_bytes).await
}
