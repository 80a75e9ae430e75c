//! User endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::User;

/// Request to register a new user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    pub username: String,
    pub password: String,
}

/// Request to favourite a movie
#[derive(Debug, Clone, Deserialize)]
pub struct AddFavouriteRequest {
    pub movie: String,
}

/// User snapshot for transport. The password hash and api token are never
/// serialized.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub favourites: Vec<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            favourites: user
                .favourites()
                .iter()
                .map(|movie| movie.name().to_string())
                .collect(),
        }
    }
}

/// POST /v1/users
///
/// Registration is the one endpoint open to unauthenticated callers.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(username = %request.username, "Registering user");

    let user = state
        .user_service
        .register(&request.username, &request.password)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /v1/users/me
pub async fn get_current_user(
    RequireUser(user): RequireUser,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /v1/users/me/favourites
pub async fn add_favourite(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<AddFavouriteRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(username = %user.username(), movie = %request.movie, "Adding favourite");

    let user = state
        .user_service
        .add_favourite(&user, &request.movie)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /v1/users/me/favourites/{movie}
pub async fn remove_favourite(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(movie): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(username = %user.username(), movie = %movie, "Removing favourite");

    let user = state
        .user_service
        .remove_favourite(&user, &movie)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::PasswordHasher;
    use crate::domain::{DomainError, Movie};

    #[derive(Debug)]
    struct FakeHasher;

    impl PasswordHasher for FakeHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            hash == format!("hashed:{password}")
        }
    }

    #[test]
    fn test_user_response_from() {
        let mut user = User::new("fred1E", "password123", &FakeHasher).unwrap();
        user.add_favourite(&Movie::new("Heat").unwrap()).unwrap();

        let response = UserResponse::from(&user);
        assert_eq!(response.username, "fred1E");
        assert_eq!(response.favourites, vec!["Heat"]);
    }

    #[test]
    fn test_user_response_never_leaks_credentials() {
        let mut user = User::new("fred1E", "password123", &FakeHasher).unwrap();
        user.generate_api_token();

        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hashed"));
        assert!(!json.contains(user.api_token().unwrap()));
    }

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{"username": "fred1E", "password": "password123"}"#;

        let request: CreateUserApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "fred1E");
        assert_eq!(request.password, "password123");
    }
}
