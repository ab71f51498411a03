//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the session user from a JWT Bearer token.

pub mod auth;
