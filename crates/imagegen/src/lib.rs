//! Image acquisition for generated assets.
//!
//! An [`ImageGenerator`] runs an ordered chain of fallible
//! [`ImageStrategy`] implementations (AI image endpoint, stock-photo
//! search, chat-guessed stock URL) and falls back to a deterministic
//! placeholder URL, so generation always yields an image URL.
//!
//! [`storage::BlobStorage`] optionally mirrors acquired images into a
//! storage bucket.

pub mod config;
pub mod error;
pub mod generator;
pub mod openrouter;
pub mod placeholder;
pub mod prompt;
pub mod stock;
pub mod storage;
pub mod strategy;

pub use config::{ImageGenConfig, StorageConfig};
pub use error::ImageGenError;
pub use generator::{GenerationMetadata, GenerationResult, ImageGenerator};
pub use strategy::ImageStrategy;
