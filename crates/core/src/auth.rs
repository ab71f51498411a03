//! The single built-in dashboard account.
//!
//! There is no user table: exactly one credential pair is accepted and it
//! always maps to an admin descriptor.

use serde::{Deserialize, Serialize};

use crate::roles::ROLE_ADMIN;

pub const ADMIN_USERNAME: &str = "generator_admin";
pub const ADMIN_PASSWORD: &str = "moodAsset";

/// User descriptor returned on login and embedded in session responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub role: String,
}

impl SessionUser {
    pub fn admin() -> Self {
        Self {
            username: ADMIN_USERNAME.to_string(),
            role: ROLE_ADMIN.to_string(),
        }
    }
}

/// Check a credential pair. Both parts must match exactly.
pub fn verify_credentials(username: &str, password: &str) -> Option<SessionUser> {
    let username_ok = constant_time_eq(username.as_bytes(), ADMIN_USERNAME.as_bytes());
    let password_ok = constant_time_eq(password.as_bytes(), ADMIN_PASSWORD.as_bytes());
    (username_ok & password_ok).then(SessionUser::admin)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
