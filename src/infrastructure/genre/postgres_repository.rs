//! PostgreSQL genre repository implementation

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::actor::ActorRepository;
use crate::domain::genre::{Genre, GenreRepository};
use crate::domain::movie::MovieRepository;
use crate::domain::DomainError;

/// PostgreSQL implementation of [`GenreRepository`].
///
/// Member lists are stored by name and resolved through the movie and actor
/// repositories on load; members deleted from the catalogue silently drop
/// out of the genre.
#[derive(Debug)]
pub struct PostgresGenreRepository {
    pool: PgPool,
    movies: Arc<dyn MovieRepository>,
    actors: Arc<dyn ActorRepository>,
}

impl PostgresGenreRepository {
    pub fn new(
        pool: PgPool,
        movies: Arc<dyn MovieRepository>,
        actors: Arc<dyn ActorRepository>,
    ) -> Self {
        Self {
            pool,
            movies,
            actors,
        }
    }

    async fn load_aggregate(&self, row: &sqlx::postgres::PgRow) -> Result<Genre, DomainError> {
        let id: i64 = row.get("id");

        let movie_names: Vec<String> = sqlx::query_scalar(
            "SELECT movie_name FROM genre_movies WHERE genre_id = $1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load genre movies: {e}")))?;

        let mut movies = Vec::with_capacity(movie_names.len());

        for name in &movie_names {
            if let Some(movie) = self.movies.find_by_name(name).await? {
                movies.push(movie);
            }
        }

        let actor_names: Vec<String> = sqlx::query_scalar(
            "SELECT actor_name FROM genre_actors WHERE genre_id = $1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load genre actors: {e}")))?;

        let mut actors = Vec::with_capacity(actor_names.len());

        for name in &actor_names {
            if let Some(actor) = self.actors.find_by_name(name).await? {
                actors.push(actor);
            }
        }

        Ok(Genre::restore(Some(id), row.get("name"), movies, actors))
    }
}

async fn write_members(
    tx: &mut Transaction<'_, Postgres>,
    genre_id: i64,
    genre: &Genre,
) -> Result<(), sqlx::Error> {
    for (position, movie) in genre.movies().iter().enumerate() {
        sqlx::query(
            "INSERT INTO genre_movies (genre_id, position, movie_name) VALUES ($1, $2, $3)",
        )
        .bind(genre_id)
        .bind(position as i32)
        .bind(movie.name())
        .execute(&mut **tx)
        .await?;
    }

    for (position, actor) in genre.direct_actors().iter().enumerate() {
        sqlx::query(
            "INSERT INTO genre_actors (genre_id, position, actor_name) VALUES ($1, $2, $3)",
        )
        .bind(genre_id)
        .bind(position as i32)
        .bind(actor.name())
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

fn map_write_error(e: sqlx::Error, name: &str) -> DomainError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        DomainError::conflict(format!("Genre '{name}' already exists"))
    } else {
        DomainError::storage(format!("Failed to save genre: {e}"))
    }
}

#[async_trait]
impl GenreRepository for PostgresGenreRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get genre: {e}")))?;

        match row {
            Some(row) => Ok(Some(self.load_aggregate(&row).await?)),
            None => Ok(None),
        }
    }

    async fn add(&self, mut genre: Genre) -> Result<Genre, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to open transaction: {e}")))?;

        let id: i64 = sqlx::query_scalar("INSERT INTO genres (name) VALUES ($1) RETURNING id")
            .bind(genre.name())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, genre.name()))?;

        write_members(&mut tx, id, &genre)
            .await
            .map_err(|e| map_write_error(e, genre.name()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit: {e}")))?;

        genre.set_id(id);
        Ok(genre)
    }

    async fn update(&self, genre: &Genre) -> Result<Genre, DomainError> {
        let id = genre
            .id()
            .ok_or_else(|| DomainError::storage("Cannot update an unsaved genre"))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to open transaction: {e}")))?;

        let result = sqlx::query("UPDATE genres SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(genre.name())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, genre.name()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Genre '{}' not found",
                genre.name()
            )));
        }

        for table in ["genre_movies", "genre_actors"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE genre_id = $1"))
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to save genre: {e}")))?;
        }

        write_members(&mut tx, id, genre)
            .await
            .map_err(|e| map_write_error(e, genre.name()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit: {e}")))?;

        Ok(genre.clone())
    }

    async fn remove(&self, genre: &Genre) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM genres WHERE name = $1")
            .bind(genre.name())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete genre: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Genre>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list genres: {e}")))?;

        let mut genres = Vec::with_capacity(rows.len());

        for row in &rows {
            genres.push(self.load_aggregate(row).await?);
        }

        Ok(genres)
    }
}
