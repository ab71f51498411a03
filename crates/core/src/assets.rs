//! Asset constants, request validation, and metadata helpers.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Status written for every stored asset.
pub const STATUS_DONE: &str = "done";

// ---------------------------------------------------------------------------
// Display defaults
// ---------------------------------------------------------------------------

/// Card name shown for an asset whose name is blank.
pub const UNTITLED_NAME: &str = "Untitled";

/// Card image shown for an asset whose image URL is blank.
pub const PLACEHOLDER_IMAGE_PATH: &str = "/placeholder-asset.png";

/// Metadata key stamped on every update.
pub const META_UPDATED_AT: &str = "updated_at";

/// Default and maximum number of assets returned by the recent-assets listing.
pub const DEFAULT_RECENT_LIMIT: i64 = 10;
pub const MAX_RECENT_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Return the names of required fields that are absent or empty.
pub fn missing_fields(fields: &[(&'static str, Option<&str>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.map_or(true, str::is_empty))
        .map(|(name, _)| *name)
        .collect()
}

/// Reject a provided-but-blank asset name on update.
pub fn validate_name_update(name: Option<&str>) -> Result<(), CoreError> {
    match name {
        Some(n) if n.trim().is_empty() => Err(CoreError::Validation(
            "Asset name must not be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Reject a provided-but-empty image URL on update.
pub fn validate_image_url_update(image_url: Option<&str>) -> Result<(), CoreError> {
    match image_url {
        Some(u) if u.trim().is_empty() => Err(CoreError::Validation(
            "image_url must not be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Clamp a requested recent-assets limit into `1..=MAX_RECENT_LIMIT`.
pub fn clamp_recent_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_RECENT_LIMIT)
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Build the metadata patch merged into an asset on update.
///
/// Supplied keys are kept and `updated_at` is always overwritten with `now`.
/// Metadata must be a JSON object (or null, treated as empty).
pub fn update_metadata_patch(
    metadata: Option<Value>,
    now: Timestamp,
) -> Result<Value, CoreError> {
    let mut map = match metadata {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(CoreError::Validation(
                "metadata must be a JSON object".to_string(),
            ))
        }
    };
    map.insert(META_UPDATED_AT.to_string(), Value::String(now.to_rfc3339()));
    Ok(Value::Object(map))
}

/// Validate metadata supplied on create; absent metadata becomes `{}`.
pub fn create_metadata(metadata: Option<Value>) -> Result<Value, CoreError> {
    match metadata {
        None | Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(v @ Value::Object(_)) => Ok(v),
        Some(_) => Err(CoreError::Validation(
            "metadata must be a JSON object".to_string(),
        )),
    }
}

/// File name offered when an asset image is exported.
///
/// Characters that would break a `Content-Disposition` header or a path are
/// replaced with `_`.
pub fn export_file_name(name: &str) -> String {
    let base: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' | '\r' | '\n' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let base = if base.is_empty() { UNTITLED_NAME.to_string() } else { base };
    format!("{base}.png")
}
