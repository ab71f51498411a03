//! Repository for the read-only `workspaces` catalog.

use moodasset_core::types::DbId;
use moodasset_core::workspace::WorkspaceKey;
use sqlx::PgPool;

use crate::models::workspace::Workspace;

/// Column list for `workspaces` queries.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Read access to the workspace catalog.
pub struct WorkspaceRepo;

impl WorkspaceRepo {
    /// List every workspace, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces ORDER BY created_at, id");
        sqlx::query_as::<_, Workspace>(&query).fetch_all(pool).await
    }

    /// Find a workspace by its unique display name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE name = $1");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a parsed workspace key to its row via the key's display name.
    pub async fn find_by_key(
        pool: &PgPool,
        key: WorkspaceKey,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        Self::find_by_name(pool, key.display_name()).await
    }

    /// Find a workspace by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE id = $1");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
