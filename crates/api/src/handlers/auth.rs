//! Handlers for the `/auth` resource (login, session check, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use moodasset_core::auth::{verify_credentials, SessionUser};
use moodasset_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`. Absent fields are treated as empty.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: SessionUser,
}

/// Response for `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: SessionUser,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Check the credential pair and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let Some(user) = verify_credentials(&input.username, &input.password) else {
        tracing::info!(username = %input.username, "Rejected login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    };

    let access_token = generate_token(&user, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user,
    }))
}

/// GET /api/auth/session
///
/// Report the session behind the Bearer token. 401 when absent or invalid.
pub async fn session(AuthUser(user): AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: true,
        user,
    })
}

/// POST /api/auth/logout
///
/// Tokens are not tracked server-side; the client discards its token.
pub async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}
