//! Well-known role name constants.

pub const ROLE_ADMIN: &str = "admin";
