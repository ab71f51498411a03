//! Authentication primitives.
//!
//! - [`jwt`] -- session token generation and validation.

pub mod jwt;
