//! In-memory actor repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::actor::{Actor, ActorRepository};
use crate::domain::DomainError;

/// In-memory implementation of [`ActorRepository`].
///
/// Keyed by name so listings come out name-ordered for free.
#[derive(Debug)]
pub struct InMemoryActorRepository {
    actors: Arc<RwLock<BTreeMap<String, Actor>>>,
    next_id: AtomicI64,
}

impl InMemoryActorRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            actors: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryActorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActorRepository for InMemoryActorRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Actor>, DomainError> {
        let actors = self.actors.read().await;
        Ok(actors.get(name).cloned())
    }

    async fn add(&self, mut actor: Actor) -> Result<Actor, DomainError> {
        let mut actors = self.actors.write().await;

        if actors.contains_key(actor.name()) {
            return Err(DomainError::conflict(format!(
                "Actor '{}' already exists",
                actor.name()
            )));
        }

        actor.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        actors.insert(actor.name().to_string(), actor.clone());

        Ok(actor)
    }

    async fn update(&self, actor: &Actor) -> Result<Actor, DomainError> {
        let id = actor
            .id()
            .ok_or_else(|| DomainError::storage("Cannot update an unsaved actor"))?;

        let mut actors = self.actors.write().await;

        let old_name = actors
            .iter()
            .find(|(_, stored)| stored.id() == Some(id))
            .map(|(name, _)| name.clone())
            .ok_or_else(|| {
                DomainError::not_found(format!("Actor '{}' not found", actor.name()))
            })?;

        if old_name != actor.name() && actors.contains_key(actor.name()) {
            return Err(DomainError::conflict(format!(
                "Actor '{}' already exists",
                actor.name()
            )));
        }

        actors.remove(&old_name);
        actors.insert(actor.name().to_string(), actor.clone());

        Ok(actor.clone())
    }

    async fn remove(&self, actor: &Actor) -> Result<bool, DomainError> {
        let mut actors = self.actors.write().await;
        Ok(actors.remove(actor.name()).is_some())
    }

    async fn list(&self) -> Result<Vec<Actor>, DomainError> {
        let actors = self.actors.read().await;
        Ok(actors.values().cloned().collect())
    }
}
