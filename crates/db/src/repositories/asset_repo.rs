//! Repository for the `assets` table.

use moodasset_core::assets::STATUS_DONE;
use moodasset_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset::{Asset, AssetWithWorkspace, CreateAsset, UpdateAsset};

/// Column list for `assets` queries.
const COLUMNS: &str = "\
    id, workspace_id, name, prompt, image_url, metadata, status, \
    created_at, updated_at";

/// Column list for `assets` joined as `a` with `workspaces` as `w`.
const JOINED_COLUMNS: &str = "\
    a.id, a.workspace_id, a.name, a.prompt, a.image_url, a.metadata, a.status, \
    a.created_at, a.updated_at, w.name AS workspace_name";

/// Provides CRUD operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset with status [`STATUS_DONE`].
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (workspace_id, name, prompt, image_url, metadata, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(input.workspace_id)
            .bind(&input.name)
            .bind(&input.prompt)
            .bind(&input.image_url)
            .bind(&input.metadata)
            .bind(STATUS_DONE)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a workspace's assets, newest first.
    pub async fn list_for_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets \
             WHERE workspace_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// Most recent assets across all workspaces, with their workspace name.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<AssetWithWorkspace>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM assets a \
             JOIN workspaces w ON w.id = a.workspace_id \
             ORDER BY a.created_at DESC, a.id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, AssetWithWorkspace>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count the assets in a workspace.
    pub async fn count_for_workspace(pool: &PgPool, workspace_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assets WHERE workspace_id = $1")
            .bind(workspace_id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Patch an asset. Only non-`None` fields are applied; `metadata` is
    /// merged key-by-key over the stored object.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAsset,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET \
                name = COALESCE($2, name), \
                prompt = COALESCE($3, prompt), \
                image_url = COALESCE($4, image_url), \
                metadata = metadata || COALESCE($5, '{{}}'::jsonb) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.prompt.as_deref())
            .bind(input.image_url.as_deref())
            .bind(input.metadata.as_ref())
            .fetch_optional(pool)
            .await
    }

    /// Delete an asset by ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
