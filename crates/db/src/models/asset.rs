//! Asset models and DTOs.

use moodasset_core::assets::{META_UPDATED_AT, PLACEHOLDER_IMAGE_PATH, UNTITLED_NAME};
use moodasset_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub workspace_id: DbId,
    pub name: String,
    pub prompt: String,
    pub image_url: String,
    pub metadata: serde_json::Value,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An asset joined with the name of its workspace, for cross-workspace feeds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetWithWorkspace {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub asset: Asset,
    pub workspace_name: String,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a new asset. `metadata` must already be a JSON object.
#[derive(Debug, Clone)]
pub struct CreateAsset {
    pub workspace_id: DbId,
    pub name: String,
    pub prompt: String,
    pub image_url: String,
    pub metadata: serde_json::Value,
}

/// DTO for patching an asset. `metadata` is merged over the stored object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAsset {
    pub name: Option<String>,
    pub prompt: Option<String>,
    pub image_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Gallery view
// ---------------------------------------------------------------------------

/// Gallery card for a workspace page.
///
/// Blank names and image URLs are replaced with display defaults, and
/// `updated_at` is read from the metadata stamp written by edits.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCard {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub prompt: String,
    pub created_at: Timestamp,
    pub updated_at: Option<String>,
    pub style: String,
}

impl AssetCard {
    pub fn from_asset(asset: &Asset, style: &str) -> Self {
        let name = if asset.name.is_empty() {
            UNTITLED_NAME.to_string()
        } else {
            asset.name.clone()
        };
        let image_url = if asset.image_url.is_empty() {
            PLACEHOLDER_IMAGE_PATH.to_string()
        } else {
            asset.image_url.clone()
        };
        let updated_at = asset
            .metadata
            .get(META_UPDATED_AT)
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Self {
            id: asset.id,
            name,
            image_url,
            prompt: asset.prompt.clone(),
            created_at: asset.created_at,
            updated_at,
            style: style.to_string(),
        }
    }
}
