//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod asset_repo;
pub mod workspace_repo;

pub use asset_repo::AssetRepo;
pub use workspace_repo::WorkspaceRepo;
