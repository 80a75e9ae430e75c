//! Authentication endpoints: login and logout

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub api_token: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// POST /auth/login
///
/// Verifies credentials and returns a fresh api token. Any token issued by
/// an earlier login stops working.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    debug!(username = %request.username, "Login attempt");

    let api_token = state
        .user_service
        .login(&request.username, &request.password)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    Ok(Json(LoginResponse { api_token }))
}

/// POST /auth/logout
///
/// Clears the authenticated user's api token; subsequent requests with the
/// old token are rejected.
pub async fn logout(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<LogoutResponse>, ApiError> {
    debug!(username = %user.username(), "Logout");

    state.user_service.logout(&user).await.map_err(ApiError::from)?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
