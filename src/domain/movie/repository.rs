//! Movie repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Movie;
use crate::domain::DomainError;

/// Repository trait for movie storage.
///
/// Implementations persist the whole aggregate (scalar fields, roster,
/// ratings) atomically and rehydrate roster actors from live actor records.
#[async_trait]
pub trait MovieRepository: Send + Sync + Debug {
    /// Retrieve a movie by name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Movie>, DomainError>;

    /// Persist a new movie and assign its identity.
    async fn add(&self, movie: Movie) -> Result<Movie, DomainError>;

    /// Update an existing movie.
    async fn update(&self, movie: &Movie) -> Result<Movie, DomainError>;

    /// Remove a movie. Returns whether anything was deleted.
    async fn remove(&self, movie: &Movie) -> Result<bool, DomainError>;

    /// List all movies ordered by name.
    async fn list(&self) -> Result<Vec<Movie>, DomainError>;
}
