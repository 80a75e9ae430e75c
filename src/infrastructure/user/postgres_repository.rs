//! PostgreSQL user repository implementation

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::movie::MovieRepository;
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of [`UserRepository`].
///
/// Username and api-token uniqueness are enforced by unique indexes;
/// favourites are stored by movie name and rehydrated on load.
#[derive(Debug)]
pub struct PostgresUserRepository {
    pool: PgPool,
    movies: Arc<dyn MovieRepository>,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool, movies: Arc<dyn MovieRepository>) -> Self {
        Self { pool, movies }
    }

    async fn load_aggregate(&self, row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
        let id: i64 = row.get("id");

        let movie_names: Vec<String> = sqlx::query_scalar(
            "SELECT movie_name FROM user_favourites WHERE user_id = $1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load favourites: {e}")))?;

        let mut favourites = Vec::with_capacity(movie_names.len());

        for name in &movie_names {
            if let Some(movie) = self.movies.find_by_name(name).await? {
                favourites.push(movie);
            }
        }

        Ok(User::restore(
            Some(id),
            row.get("username"),
            row.get("password_hash"),
            row.get("api_token"),
            favourites,
        ))
    }
}

async fn write_favourites(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    user: &User,
) -> Result<(), sqlx::Error> {
    for (position, movie) in user.favourites().iter().enumerate() {
        sqlx::query(
            "INSERT INTO user_favourites (user_id, position, movie_name) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(position as i32)
        .bind(movie.name())
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

fn map_write_error(e: sqlx::Error, username: &str) -> DomainError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        DomainError::conflict(format!("Username '{username}' already exists"))
    } else {
        DomainError::storage(format!("Failed to save user: {e}"))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, api_token FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {e}")))?;

        match row {
            Some(row) => Ok(Some(self.load_aggregate(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, api_token FROM users WHERE api_token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by token: {e}")))?;

        match row {
            Some(row) => Ok(Some(self.load_aggregate(&row).await?)),
            None => Ok(None),
        }
    }

    async fn add(&self, mut user: User) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to open transaction: {e}")))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, password_hash, api_token)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user.username())
        .bind(user.password_hash())
        .bind(user.api_token())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, user.username()))?;

        write_favourites(&mut tx, id, &user)
            .await
            .map_err(|e| map_write_error(e, user.username()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit: {e}")))?;

        user.set_id(id);
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let id = user
            .id()
            .ok_or_else(|| DomainError::storage("Cannot update an unsaved user"))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to open transaction: {e}")))?;

        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, api_token = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(user.password_hash())
        .bind(user.api_token())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, user.username()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.username()
            )));
        }

        sqlx::query("DELETE FROM user_favourites WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to save user: {e}")))?;

        write_favourites(&mut tx, id, user)
            .await
            .map_err(|e| map_write_error(e, user.username()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit: {e}")))?;

        Ok(user.clone())
    }

    async fn remove(&self, user: &User) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(user.username())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, username, password_hash, api_token FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {e}")))?;

        let mut users = Vec::with_capacity(rows.len());

        for row in &rows {
            users.push(self.load_aggregate(row).await?);
        }

        Ok(users)
    }
}
