//! Mirroring of acquired images into a storage bucket.
//!
//! Talks to a Supabase-compatible storage REST API: objects are uploaded
//! with upsert semantics and served from the bucket's public URL.

use rand::distr::Alphanumeric;
use rand::Rng;

use crate::config::StorageConfig;
use crate::error::ImageGenError;

const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";
const RANDOM_SUFFIX_LEN: usize = 6;

/// Client for a single storage bucket.
#[derive(Clone)]
pub struct BlobStorage {
    client: reqwest::Client,
    config: StorageConfig,
}

impl BlobStorage {
    pub fn new(client: reqwest::Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    /// Whether generated images should be mirrored before being persisted.
    pub fn mirror_enabled(&self) -> bool {
        self.config.mirror_images
    }

    /// Download the image at `image_url` and store it under `file_name`.
    ///
    /// The extension is derived from the downloaded `Content-Type` and
    /// appended unless `file_name` already ends with it. Returns the public
    /// URL of the stored object.
    pub async fn upload_from_url(
        &self,
        image_url: &str,
        file_name: &str,
    ) -> Result<String, ImageGenError> {
        let response = self.client.get(image_url).send().await?;
        let response = ImageGenError::ensure_success(response).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().await?;

        let extension = extension_for_content_type(&content_type);
        let object_path = if file_name.ends_with(extension) {
            file_name.to_string()
        } else {
            format!("{file_name}{extension}")
        };

        tracing::debug!(
            object_path = %object_path,
            content_type = %content_type,
            size = bytes.len(),
            "Uploading image to storage",
        );

        let response = self
            .client
            .post(self.object_url(&object_path))
            .bearer_auth(&self.config.service_key)
            .header("apikey", &self.config.service_key)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        ImageGenError::ensure_success(response).await?;

        Ok(self.public_url(&object_path))
    }

    /// Public URL of an object in the bucket.
    pub fn public_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url, self.config.bucket, object_path
        )
    }

    fn object_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.url, self.config.bucket, object_path
        )
    }
}

/// File extension (with dot) for an image content type. Unknown types
/// are stored as `.jpg`.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "image/jpeg" | "image/jpg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/svg+xml" => ".svg",
        _ => ".jpg",
    }
}

/// Object path for a new asset image:
/// `{workspace_id}/{sanitized_name}_{unix_millis}_{random}`.
pub fn unique_file_name(asset_name: &str, workspace_id: &str) -> String {
    let sanitized: String = asset_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{workspace_id}/{sanitized}_{millis}_{suffix}")
}
