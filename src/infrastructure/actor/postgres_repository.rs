//! PostgreSQL actor repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::actor::{Actor, ActorRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of [`ActorRepository`].
#[derive(Debug, Clone)]
pub struct PostgresActorRepository {
    pool: PgPool,
}

impl PostgresActorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_actor(row: &sqlx::postgres::PgRow) -> Actor {
    Actor::restore(
        Some(row.get("id")),
        row.get("name"),
        row.get("birth"),
        row.get("bio"),
        row.get("image"),
    )
}

fn map_insert_error(e: sqlx::Error, name: &str) -> DomainError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        DomainError::conflict(format!("Actor '{name}' already exists"))
    } else {
        DomainError::storage(format!("Failed to save actor: {e}"))
    }
}

#[async_trait]
impl ActorRepository for PostgresActorRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Actor>, DomainError> {
        let row = sqlx::query("SELECT id, name, birth, bio, image FROM actors WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get actor: {e}")))?;

        Ok(row.as_ref().map(row_to_actor))
    }

    async fn add(&self, mut actor: Actor) -> Result<Actor, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO actors (name, birth, bio, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(actor.name())
        .bind(actor.birth())
        .bind(actor.bio())
        .bind(actor.image())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, actor.name()))?;

        actor.set_id(id);
        Ok(actor)
    }

    async fn update(&self, actor: &Actor) -> Result<Actor, DomainError> {
        let id = actor
            .id()
            .ok_or_else(|| DomainError::storage("Cannot update an unsaved actor"))?;

        let result = sqlx::query(
            r#"
            UPDATE actors
            SET name = $2, birth = $3, bio = $4, image = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(actor.name())
        .bind(actor.birth())
        .bind(actor.bio())
        .bind(actor.image())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, actor.name()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Actor '{}' not found",
                actor.name()
            )));
        }

        Ok(actor.clone())
    }

    async fn remove(&self, actor: &Actor) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM actors WHERE name = $1")
            .bind(actor.name())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete actor: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Actor>, DomainError> {
        let rows = sqlx::query("SELECT id, name, birth, bio, image FROM actors ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list actors: {e}")))?;

        Ok(rows.iter().map(row_to_actor).collect())
    }
}
