//! Movie Catalogue API
//!
//! A REST service for managing a movie catalogue: actors, movies, genres,
//! user accounts, favourites and ratings. Catalogue state lives behind
//! per-entity repositories with in-memory and PostgreSQL implementations.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::state::AppState;
use config::StorageBackend;
use infrastructure::actor::{ActorService, InMemoryActorRepository, PostgresActorRepository};
use infrastructure::genre::{GenreService, InMemoryGenreRepository, PostgresGenreRepository};
use infrastructure::movie::{InMemoryMovieRepository, MovieService, PostgresMovieRepository};
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService,
};

/// Create the application state for the configured storage backend.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(create_in_memory_state())
        }
        StorageBackend::Postgres => create_postgres_state(config).await,
    }
}

/// Wire the services against in-memory repositories.
///
/// The default for local development; also what the router tests run on.
pub fn create_in_memory_state() -> AppState {
    let actors = Arc::new(InMemoryActorRepository::new());
    let movies = Arc::new(InMemoryMovieRepository::new(actors.clone()));
    let genres = Arc::new(InMemoryGenreRepository::new(movies.clone(), actors.clone()));
    let users = Arc::new(InMemoryUserRepository::new(movies.clone()));
    let hasher = Arc::new(Argon2Hasher::new());

    AppState::new(
        Arc::new(ActorService::new(actors.clone())),
        Arc::new(MovieService::new(
            movies.clone(),
            genres.clone(),
            actors.clone(),
        )),
        Arc::new(GenreService::new(genres, movies.clone(), actors)),
        Arc::new(UserService::new(users, movies, hasher)),
    )
}

/// Wire the services against PostgreSQL repositories.
pub async fn create_postgres_state(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Connecting to PostgreSQL");

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let actors = Arc::new(PostgresActorRepository::new(pool.clone()));
    let movies = Arc::new(PostgresMovieRepository::new(pool.clone(), actors.clone()));
    let genres = Arc::new(PostgresGenreRepository::new(
        pool.clone(),
        movies.clone(),
        actors.clone(),
    ));
    let users = Arc::new(PostgresUserRepository::new(pool, movies.clone()));
    let hasher = Arc::new(Argon2Hasher::new());

    Ok(AppState::new(
        Arc::new(ActorService::new(actors.clone())),
        Arc::new(MovieService::new(
            movies.clone(),
            genres.clone(),
            actors.clone(),
        )),
        Arc::new(GenreService::new(genres, movies.clone(), actors)),
        Arc::new(UserService::new(users, movies, hasher)),
    ))
}
