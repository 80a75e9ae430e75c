//! PostgreSQL movie repository implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::actor::ActorRepository;
use crate::domain::movie::{Movie, MovieRepository, Role};
use crate::domain::DomainError;

/// PostgreSQL implementation of [`MovieRepository`].
///
/// The aggregate (movie row, roster, ratings) is written inside a single
/// transaction; a failure anywhere discards the whole change set. Roster
/// entries reference actors by name and are rehydrated through the actor
/// repository on load.
#[derive(Debug)]
pub struct PostgresMovieRepository {
    pool: PgPool,
    actors: Arc<dyn ActorRepository>,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool, actors: Arc<dyn ActorRepository>) -> Self {
        Self { pool, actors }
    }

    async fn load_aggregate(&self, row: &sqlx::postgres::PgRow) -> Result<Movie, DomainError> {
        let id: i64 = row.get("id");

        let roster_rows = sqlx::query(
            r#"
            SELECT character_name, actor_name
            FROM movie_roster
            WHERE movie_id = $1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load roster: {e}")))?;

        let mut roster = Vec::with_capacity(roster_rows.len());

        for entry in &roster_rows {
            let actor_name: String = entry.get("actor_name");

            if let Some(actor) = self.actors.find_by_name(&actor_name).await? {
                roster.push(Role::new(entry.get("character_name"), actor));
            }
        }

        let rating_rows =
            sqlx::query("SELECT username, rating FROM movie_ratings WHERE movie_id = $1")
                .bind(id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to load ratings: {e}")))?;

        let mut ratings = HashMap::with_capacity(rating_rows.len());

        for entry in &rating_rows {
            let rating: i32 = entry.get("rating");
            ratings.insert(entry.get::<String, _>("username"), rating);
        }

        Ok(Movie::restore(
            Some(id),
            row.get("name"),
            row.get("genre"),
            roster,
            ratings,
            row.get("description"),
            row.get("image"),
        ))
    }
}

async fn write_members(
    tx: &mut Transaction<'_, Postgres>,
    movie_id: i64,
    movie: &Movie,
) -> Result<(), sqlx::Error> {
    for (position, role) in movie.roles().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO movie_roster (movie_id, position, character_name, actor_name)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(movie_id)
        .bind(position as i32)
        .bind(role.character())
        .bind(role.actor().name())
        .execute(&mut **tx)
        .await?;
    }

    for (username, rating) in movie.ratings() {
        sqlx::query(
            r#"
            INSERT INTO movie_ratings (movie_id, username, rating)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(movie_id)
        .bind(username)
        .bind(rating)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

fn map_write_error(e: sqlx::Error, name: &str) -> DomainError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        DomainError::conflict(format!("Movie '{name}' already exists"))
    } else {
        DomainError::storage(format!("Failed to save movie: {e}"))
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Movie>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, genre, description, image FROM movies WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get movie: {e}")))?;

        match row {
            Some(row) => Ok(Some(self.load_aggregate(&row).await?)),
            None => Ok(None),
        }
    }

    async fn add(&self, mut movie: Movie) -> Result<Movie, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to open transaction: {e}")))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO movies (name, genre, description, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(movie.name())
        .bind(movie.genre())
        .bind(movie.description())
        .bind(movie.image())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, movie.name()))?;

        write_members(&mut tx, id, &movie)
            .await
            .map_err(|e| map_write_error(e, movie.name()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit: {e}")))?;

        movie.set_id(id);
        Ok(movie)
    }

    async fn update(&self, movie: &Movie) -> Result<Movie, DomainError> {
        let id = movie
            .id()
            .ok_or_else(|| DomainError::storage("Cannot update an unsaved movie"))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to open transaction: {e}")))?;

        let result = sqlx::query(
            r#"
            UPDATE movies
            SET name = $2, genre = $3, description = $4, image = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(movie.name())
        .bind(movie.genre())
        .bind(movie.description())
        .bind(movie.image())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, movie.name()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Movie '{}' not found",
                movie.name()
            )));
        }

        sqlx::query("DELETE FROM movie_roster WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to save movie: {e}")))?;

        sqlx::query("DELETE FROM movie_ratings WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to save movie: {e}")))?;

        write_members(&mut tx, id, movie)
            .await
            .map_err(|e| map_write_error(e, movie.name()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit: {e}")))?;

        Ok(movie.clone())
    }

    async fn remove(&self, movie: &Movie) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM movies WHERE name = $1")
            .bind(movie.name())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete movie: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Movie>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, genre, description, image FROM movies ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list movies: {e}")))?;

        let mut movies = Vec::with_capacity(rows.len());

        for row in &rows {
            movies.push(self.load_aggregate(row).await?);
        }

        Ok(movies)
    }
}
