//! Workspace catalog rows.

use moodasset_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `workspaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workspace {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Asset total for one workspace.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceAssetCount {
    pub workspace_id: DbId,
    pub count: i64,
}
