//! Movie endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::Movie;
use crate::infrastructure::movie::{UpdateMovieRequest, UserRating};

/// Request to create a new movie
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovieApiRequest {
    pub name: String,
}

/// Request to change a movie; absent fields are left untouched.
/// A rating is recorded for the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMovieApiRequest {
    pub genre: Option<String>,
    pub rating: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Request to add an actor to a movie's roster
#[derive(Debug, Clone, Deserialize)]
pub struct AddMovieActorRequest {
    pub character: String,
    pub actor: String,
}

/// Movie snapshot for transport: nested names, derived average rating and a
/// character -> actor name view of the roster.
#[derive(Debug, Clone, Serialize)]
pub struct MovieResponse {
    pub name: String,
    pub genre: Option<String>,
    pub actors: serde_json::Map<String, serde_json::Value>,
    pub rating: f64,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        let mut actors = serde_json::Map::new();

        for role in movie.roles() {
            actors.insert(
                role.character().to_string(),
                serde_json::Value::String(role.actor().name().to_string()),
            );
        }

        Self {
            name: movie.name().to_string(),
            genre: movie.genre().map(String::from),
            actors,
            rating: movie.rating(),
            description: movie.description().map(String::from),
            image: movie.image().map(String::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListMoviesResponse {
    pub movies: Vec<MovieResponse>,
    pub total: usize,
}

/// POST /v1/movies
pub async fn create_movie(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Json(request): Json<CreateMovieApiRequest>,
) -> Result<(StatusCode, Json<MovieResponse>), ApiError> {
    debug!(name = %request.name, "Creating movie");

    let movie = state
        .movie_service
        .create(&request.name)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(MovieResponse::from(&movie))))
}

/// GET /v1/movies
pub async fn list_movies(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<ListMoviesResponse>, ApiError> {
    let movies = state.movie_service.list().await.map_err(ApiError::from)?;

    let responses: Vec<MovieResponse> = movies.iter().map(MovieResponse::from).collect();
    let total = responses.len();

    Ok(Json(ListMoviesResponse {
        movies: responses,
        total,
    }))
}

/// GET /v1/movies/{name}
pub async fn get_movie(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(name): Path<String>,
) -> Result<Json<MovieResponse>, ApiError> {
    let movie = state.movie_service.show(&name).await.map_err(ApiError::from)?;

    Ok(Json(MovieResponse::from(&movie)))
}

/// PUT /v1/movies/{name}
pub async fn update_movie(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(name): Path<String>,
    Json(request): Json<UpdateMovieApiRequest>,
) -> Result<Json<MovieResponse>, ApiError> {
    debug!(name = %name, "Changing movie");

    let rating = request.rating.map(|value| UserRating {
        username: user.username().to_string(),
        value,
    });

    let movie = state
        .movie_service
        .change(
            &name,
            UpdateMovieRequest {
                genre: request.genre,
                rating,
                description: request.description,
                image: request.image,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(MovieResponse::from(&movie)))
}

/// DELETE /v1/movies/{name}
pub async fn delete_movie(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(name = %name, "Deleting movie");

    state.movie_service.remove(&name).await.map_err(ApiError::from)?;

    Ok(Json(serde_json::json!({
        "deleted": true,
        "name": name
    })))
}

/// POST /v1/movies/{name}/actors
pub async fn add_movie_actor(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(name): Path<String>,
    Json(request): Json<AddMovieActorRequest>,
) -> Result<Json<MovieResponse>, ApiError> {
    debug!(name = %name, actor = %request.actor, "Adding actor to movie");

    let movie = state
        .movie_service
        .add_actor(&name, &request.character, &request.actor)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(MovieResponse::from(&movie)))
}

/// DELETE /v1/movies/{name}/actors/{actor}
pub async fn remove_movie_actor(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path((name, actor)): Path<(String, String)>,
) -> Result<Json<MovieResponse>, ApiError> {
    debug!(name = %name, actor = %actor, "Removing actor from movie");

    let movie = state
        .movie_service
        .remove_actor(&name, &actor)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(MovieResponse::from(&movie)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Actor;
    use chrono::{TimeZone, Utc};

    fn actor(name: &str) -> Actor {
        let birth = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        Actor::new(name, birth).unwrap()
    }

    #[test]
    fn test_movie_response_empty_movie() {
        let movie = Movie::new("Heat").unwrap();

        let response = MovieResponse::from(&movie);
        assert_eq!(response.name, "Heat");
        assert!(response.genre.is_none());
        assert!(response.actors.is_empty());
        assert_eq!(response.rating, 0.0);
    }

    #[test]
    fn test_movie_response_roster_view() {
        let mut movie = Movie::new("Heat").unwrap();
        movie.add_actor("Hanna", &actor("Al Pacino")).unwrap();
        movie.add_actor("McCauley", &actor("Robert De Niro")).unwrap();

        let response = MovieResponse::from(&movie);
        assert_eq!(
            response.actors.get("Hanna"),
            Some(&serde_json::Value::String("Al Pacino".to_string()))
        );
        assert_eq!(
            response.actors.get("McCauley"),
            Some(&serde_json::Value::String("Robert De Niro".to_string()))
        );
    }

    #[test]
    fn test_movie_response_rating_overwrite() {
        let mut movie = Movie::new("Heat").unwrap();

        movie.add_rating("u1", 5).unwrap();
        assert_eq!(MovieResponse::from(&movie).rating, 5.0);

        movie.add_rating("u1", 3).unwrap();
        assert_eq!(MovieResponse::from(&movie).rating, 3.0);
    }

    #[test]
    fn test_movie_response_serialization() {
        let mut movie = Movie::new("Heat").unwrap();
        movie.add_actor("Hanna", &actor("Al Pacino")).unwrap();

        let json = serde_json::to_string(&MovieResponse::from(&movie)).unwrap();
        assert!(json.contains("\"name\":\"Heat\""));
        assert!(json.contains("\"Hanna\":\"Al Pacino\""));
        assert!(json.contains("\"rating\":0.0"));
        assert!(json.contains("\"genre\":null"));
    }

    #[test]
    fn test_update_request_deserialization() {
        let json = r#"{"genre": "Thriller", "rating": 4}"#;

        let request: UpdateMovieApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.genre, Some("Thriller".to_string()));
        assert_eq!(request.rating, Some(4));
        assert!(request.description.is_none());
    }
}
