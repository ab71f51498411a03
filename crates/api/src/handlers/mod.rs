pub mod assets;
pub mod auth;
pub mod generation;
pub mod workspaces;
