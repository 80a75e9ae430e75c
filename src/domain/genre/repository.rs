//! Genre repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Genre;
use crate::domain::DomainError;

/// Repository trait for genre storage.
///
/// Implementations persist membership by member name and rehydrate member
/// movies and actors from their live records on load, so a genre read always
/// reflects the current state of its members.
#[async_trait]
pub trait GenreRepository: Send + Sync + Debug {
    /// Retrieve a genre by name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, DomainError>;

    /// Persist a new genre and assign its identity.
    async fn add(&self, genre: Genre) -> Result<Genre, DomainError>;

    /// Update an existing genre.
    async fn update(&self, genre: &Genre) -> Result<Genre, DomainError>;

    /// Remove a genre. Returns whether anything was deleted.
    async fn remove(&self, genre: &Genre) -> Result<bool, DomainError>;

    /// List all genres ordered by name.
    async fn list(&self) -> Result<Vec<Genre>, DomainError>;
}
