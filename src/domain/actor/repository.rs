//! Actor repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Actor;
use crate::domain::DomainError;

/// Repository trait for actor storage.
///
/// Name uniqueness across actors is enforced here, not by the entity.
#[async_trait]
pub trait ActorRepository: Send + Sync + Debug {
    /// Retrieve an actor by name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Actor>, DomainError>;

    /// Persist a new actor and assign its identity.
    async fn add(&self, actor: Actor) -> Result<Actor, DomainError>;

    /// Update an existing actor.
    async fn update(&self, actor: &Actor) -> Result<Actor, DomainError>;

    /// Remove an actor. Returns whether anything was deleted.
    async fn remove(&self, actor: &Actor) -> Result<bool, DomainError>;

    /// List all actors ordered by name.
    async fn list(&self) -> Result<Vec<Actor>, DomainError>;
}
