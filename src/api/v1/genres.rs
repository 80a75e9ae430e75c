//! Genre endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::Genre;

/// Request to create a new genre
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGenreApiRequest {
    pub name: String,
}

/// Request to add a movie to a genre
#[derive(Debug, Clone, Deserialize)]
pub struct AddGenreMovieRequest {
    pub movie: String,
}

/// Request to add an actor to a genre's direct list
#[derive(Debug, Clone, Deserialize)]
pub struct AddGenreActorRequest {
    pub actor: String,
}

/// Genre snapshot for transport. `actors` is the derived union of roster
/// actors from member movies and direct members, de-duplicated by name.
#[derive(Debug, Clone, Serialize)]
pub struct GenreResponse {
    pub name: String,
    pub movies: Vec<String>,
    pub actors: Vec<String>,
}

impl From<&Genre> for GenreResponse {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name().to_string(),
            movies: genre
                .movies()
                .iter()
                .map(|movie| movie.name().to_string())
                .collect(),
            actors: genre
                .all_actors()
                .iter()
                .map(|actor| actor.name().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListGenresResponse {
    pub genres: Vec<GenreResponse>,
    pub total: usize,
}

/// POST /v1/genres
pub async fn create_genre(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Json(request): Json<CreateGenreApiRequest>,
) -> Result<(StatusCode, Json<GenreResponse>), ApiError> {
    debug!(name = %request.name, "Creating genre");

    let genre = state
        .genre_service
        .create(&request.name)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(GenreResponse::from(&genre))))
}

/// GET /v1/genres
pub async fn list_genres(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<ListGenresResponse>, ApiError> {
    let genres = state.genre_service.list().await.map_err(ApiError::from)?;

    let responses: Vec<GenreResponse> = genres.iter().map(GenreResponse::from).collect();
    let total = responses.len();

    Ok(Json(ListGenresResponse {
        genres: responses,
        total,
    }))
}

/// GET /v1/genres/{name}
pub async fn get_genre(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(name): Path<String>,
) -> Result<Json<GenreResponse>, ApiError> {
    let genre = state.genre_service.show(&name).await.map_err(ApiError::from)?;

    Ok(Json(GenreResponse::from(&genre)))
}

/// DELETE /v1/genres/{name}
pub async fn delete_genre(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(name = %name, "Deleting genre");

    state.genre_service.remove(&name).await.map_err(ApiError::from)?;

    Ok(Json(serde_json::json!({
        "deleted": true,
        "name": name
    })))
}

/// POST /v1/genres/{name}/movies
pub async fn add_genre_movie(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(name): Path<String>,
    Json(request): Json<AddGenreMovieRequest>,
) -> Result<Json<GenreResponse>, ApiError> {
    debug!(name = %name, movie = %request.movie, "Adding movie to genre");

    let genre = state
        .genre_service
        .add_movie(&name, &request.movie)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(GenreResponse::from(&genre)))
}

/// DELETE /v1/genres/{name}/movies/{movie}
pub async fn remove_genre_movie(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path((name, movie)): Path<(String, String)>,
) -> Result<Json<GenreResponse>, ApiError> {
    debug!(name = %name, movie = %movie, "Removing movie from genre");

    let genre = state
        .genre_service
        .remove_movie(&name, &movie)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(GenreResponse::from(&genre)))
}

/// POST /v1/genres/{name}/actors
pub async fn add_genre_actor(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(name): Path<String>,
    Json(request): Json<AddGenreActorRequest>,
) -> Result<Json<GenreResponse>, ApiError> {
    debug!(name = %name, actor = %request.actor, "Adding actor to genre");

    let genre = state
        .genre_service
        .add_actor(&name, &request.actor)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(GenreResponse::from(&genre)))
}

/// DELETE /v1/genres/{name}/actors/{actor}
pub async fn remove_genre_actor(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path((name, actor)): Path<(String, String)>,
) -> Result<Json<GenreResponse>, ApiError> {
    debug!(name = %name, actor = %actor, "Removing actor from genre");

    let genre = state
        .genre_service
        .remove_actor(&name, &actor)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(GenreResponse::from(&genre)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Actor, Movie};
    use chrono::{TimeZone, Utc};

    fn actor(name: &str) -> Actor {
        let birth = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        Actor::new(name, birth).unwrap()
    }

    #[test]
    fn test_genre_response_includes_roster_actors() {
        let mut genre = Genre::new("Thriller").unwrap();

        let mut heat = Movie::new("Heat").unwrap();
        heat.add_actor("Hanna", &actor("Al Pacino")).unwrap();
        genre.add_movie(&heat).unwrap();
        genre.add_actor(&actor("Val Kilmer")).unwrap();

        let response = GenreResponse::from(&genre);
        assert_eq!(response.name, "Thriller");
        assert_eq!(response.movies, vec!["Heat"]);
        assert_eq!(response.actors, vec!["Al Pacino", "Val Kilmer"]);
    }

    #[test]
    fn test_genre_response_dedupes_actors() {
        let mut genre = Genre::new("Thriller").unwrap();

        let mut heat = Movie::new("Heat").unwrap();
        heat.add_actor("Hanna", &actor("Al Pacino")).unwrap();
        genre.add_movie(&heat).unwrap();
        genre.add_actor(&actor("Al Pacino")).unwrap();

        let response = GenreResponse::from(&genre);
        assert_eq!(response.actors, vec!["Al Pacino"]);
    }

    #[test]
    fn test_genre_response_serialization() {
        let genre = Genre::new("Thriller").unwrap();

        let json = serde_json::to_string(&GenreResponse::from(&genre)).unwrap();
        assert!(json.contains("\"name\":\"Thriller\""));
        assert!(json.contains("\"movies\":[]"));
        assert!(json.contains("\"actors\":[]"));
    }
}
