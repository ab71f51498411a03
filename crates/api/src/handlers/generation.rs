//! Handlers for image generation.
//!
//! `POST /generate-image` runs the acquisition chain and persists the result
//! as a new asset; `POST /generate-image/preview` runs the chain only.

use axum::extract::State;
use axum::Json;
use moodasset_core::assets::missing_fields;
use moodasset_core::style::Style;
use moodasset_db::models::asset::{Asset, CreateAsset};
use moodasset_db::repositories::AssetRepo;
use moodasset_imagegen::storage::unique_file_name;
use moodasset_imagegen::{GenerationMetadata, GenerationResult};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::assets::parse_workspace_id;
use crate::state::AppState;

const GENERATE_MISSING: &str = "Missing required fields: prompt, workspaceId, assetName";
const PREVIEW_MISSING: &str = "Missing required fields: prompt";
const GENERATE_FAILED: &str = "Failed to generate image";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /generate-image`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    pub prompt: Option<String>,
    pub style: Option<String>,
    pub workspace_id: Option<String>,
    pub asset_name: Option<String>,
}

/// Request body for `POST /generate-image/preview`.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub prompt: Option<String>,
    pub style: Option<String>,
}

/// Outcome of the acquisition chain as reported to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationView {
    pub image_url: String,
    pub enhanced_prompt: String,
    pub metadata: GenerationMetadata,
    /// False when the deterministic placeholder was used.
    pub real_image_generated: bool,
}

impl From<GenerationResult> for ImageGenerationView {
    fn from(result: GenerationResult) -> Self {
        Self {
            real_image_generated: result.metadata.real_image,
            image_url: result.image_url,
            enhanced_prompt: result.prompt,
            metadata: result.metadata,
        }
    }
}

/// Response for `POST /generate-image`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub success: bool,
    pub asset: Asset,
    pub image_generation: ImageGenerationView,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/generate-image
///
/// Acquire an image for the prompt and store it as a new asset in the
/// workspace. Unknown or missing styles generate as `realistic`.
pub async fn generate_image(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<GenerateImageRequest>,
) -> AppResult<Json<GenerateImageResponse>> {
    let missing = missing_fields(&[
        ("prompt", input.prompt.as_deref()),
        ("workspaceId", input.workspace_id.as_deref()),
        ("assetName", input.asset_name.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(AppError::MissingFields {
            message: GENERATE_MISSING,
            fields: missing,
        });
    }

    let prompt = input.prompt.unwrap_or_default();
    let asset_name = input.asset_name.unwrap_or_default();
    let workspace_raw = input.workspace_id.unwrap_or_default();
    let workspace_id = parse_workspace_id(&workspace_raw, "workspaceId")?;
    let style = Style::from_tag(input.style.as_deref());

    tracing::info!(
        workspace_id = %workspace_id,
        asset_name = %asset_name,
        style = %style,
        "Generating image",
    );

    let result = state.generator.generate(&prompt, style).await;
    let image_url = mirror_image(&state, &result.image_url, &asset_name, &workspace_raw).await;

    let metadata = serde_json::to_value(&result.metadata).map_err(|e| AppError::Failed {
        message: GENERATE_FAILED,
        details: e.to_string(),
    })?;

    let create = CreateAsset {
        workspace_id,
        name: asset_name,
        prompt: result.prompt.clone(),
        image_url: image_url.clone(),
        metadata,
    };
    let asset = AssetRepo::create(&state.pool, &create)
        .await
        .map_err(|e| AppError::from_operation(GENERATE_FAILED, e))?;

    tracing::info!(
        asset_id = %asset.id,
        source = result.metadata.source,
        real_image = result.metadata.real_image,
        "Generated asset stored",
    );

    let mut image_generation = ImageGenerationView::from(result);
    image_generation.image_url = image_url;

    Ok(Json(GenerateImageResponse {
        success: true,
        asset,
        image_generation,
    }))
}

/// POST /api/generate-image/preview
///
/// Run the acquisition chain without persisting anything. Used to preview a
/// regenerated image before saving it on an existing asset.
pub async fn preview_image(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PreviewRequest>,
) -> AppResult<Json<ImageGenerationView>> {
    let missing = missing_fields(&[("prompt", input.prompt.as_deref())]);
    if !missing.is_empty() {
        return Err(AppError::MissingFields {
            message: PREVIEW_MISSING,
            fields: missing,
        });
    }

    let prompt = input.prompt.unwrap_or_default();
    let style = Style::from_tag(input.style.as_deref());
    let result = state.generator.generate(&prompt, style).await;

    Ok(Json(result.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Copy the image into the storage bucket when mirroring is enabled.
///
/// Returns the mirrored URL, or the original URL when mirroring is off or
/// fails.
async fn mirror_image(
    state: &AppState,
    image_url: &str,
    asset_name: &str,
    workspace_id: &str,
) -> String {
    let Some(storage) = state.storage.as_ref().filter(|s| s.mirror_enabled()) else {
        return image_url.to_string();
    };

    let file_name = unique_file_name(asset_name, workspace_id);
    match storage.upload_from_url(image_url, &file_name).await {
        Ok(public_url) => {
            tracing::info!(public_url = %public_url, "Image mirrored to storage");
            public_url
        }
        Err(e) => {
            tracing::warn!(error = %e, image_url = %image_url, "Image mirroring failed, keeping source URL");
            image_url.to_string()
        }
    }
}
