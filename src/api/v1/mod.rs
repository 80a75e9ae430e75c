//! v1 API endpoints

pub mod actors;
pub mod genres;
pub mod movies;
pub mod users;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create the v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        // Actors
        .route("/actors", post(actors::create_actor).get(actors::list_actors))
        .route(
            "/actors/{name}",
            get(actors::get_actor)
                .put(actors::update_actor)
                .delete(actors::delete_actor),
        )
        // Movies
        .route("/movies", post(movies::create_movie).get(movies::list_movies))
        .route(
            "/movies/{name}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/movies/{name}/actors", post(movies::add_movie_actor))
        .route(
            "/movies/{name}/actors/{actor}",
            axum::routing::delete(movies::remove_movie_actor),
        )
        // Genres
        .route("/genres", post(genres::create_genre).get(genres::list_genres))
        .route(
            "/genres/{name}",
            get(genres::get_genre).delete(genres::delete_genre),
        )
        .route("/genres/{name}/movies", post(genres::add_genre_movie))
        .route(
            "/genres/{name}/movies/{movie}",
            axum::routing::delete(genres::remove_genre_movie),
        )
        .route("/genres/{name}/actors", post(genres::add_genre_actor))
        .route(
            "/genres/{name}/actors/{actor}",
            axum::routing::delete(genres::remove_genre_actor),
        )
        // Users
        .route("/users", post(users::create_user))
        .route("/users/me", get(users::get_current_user))
        .route("/users/me/favourites", put(users::add_favourite))
        .route(
            "/users/me/favourites/{movie}",
            axum::routing::delete(users::remove_favourite),
        )
}
