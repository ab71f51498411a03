//! Domain types, constants, and pure validation logic shared by the
//! database, image generation, and API crates.

pub mod assets;
pub mod auth;
pub mod error;
pub mod roles;
pub mod style;
pub mod types;
pub mod workspace;
