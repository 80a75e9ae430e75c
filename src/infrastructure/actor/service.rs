//! Actor service for catalogue management

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::actor::{Actor, ActorRepository};
use crate::domain::DomainError;

/// Request for creating a new actor
#[derive(Debug, Clone)]
pub struct CreateActorRequest {
    pub name: String,
    pub birth: DateTime<Utc>,
}

/// Request for changing an existing actor; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateActorRequest {
    pub birth: Option<DateTime<Utc>>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

/// Use-case layer for actors: resolves names through the repository and
/// applies domain mutations.
#[derive(Debug)]
pub struct ActorService<R: ActorRepository> {
    repository: Arc<R>,
}

impl<R: ActorRepository> ActorService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new actor.
    pub async fn create(&self, request: CreateActorRequest) -> Result<Actor, DomainError> {
        let actor = Actor::new(request.name, request.birth)?;
        self.repository.add(actor).await
    }

    /// Apply the supplied changes to an existing actor.
    pub async fn change(
        &self,
        name: &str,
        request: UpdateActorRequest,
    ) -> Result<Actor, DomainError> {
        let mut actor = self.show(name).await?;

        if let Some(birth) = request.birth {
            actor.set_birth(birth)?;
        }

        if let Some(bio) = request.bio {
            actor.set_bio(Some(bio))?;
        }

        if let Some(image) = request.image {
            actor.set_image(Some(image))?;
        }

        self.repository.update(&actor).await
    }

    /// Delete an actor from the catalogue.
    pub async fn remove(&self, name: &str) -> Result<(), DomainError> {
        let actor = self.show(name).await?;
        self.repository.remove(&actor).await?;
        Ok(())
    }

    /// Look up an actor by name.
    pub async fn show(&self, name: &str) -> Result<Actor, DomainError> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found("Actor does not exist"))
    }

    /// List all actors.
    pub async fn list(&self) -> Result<Vec<Actor>, DomainError> {
        self.repository.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::actor::InMemoryActorRepository;
    use chrono::TimeZone;

    fn service() -> ActorService<InMemoryActorRepository> {
        ActorService::new(Arc::new(InMemoryActorRepository::new()))
    }

    fn birth_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1977, 6, 4, 0, 0, 0).unwrap()
    }

    fn create_request(name: &str) -> CreateActorRequest {
        CreateActorRequest {
            name: name.to_string(),
            birth: birth_date(),
        }
    }

    #[tokio::test]
    async fn test_create() {
        let service = service();

        let actor = service.create(create_request("Sam Neill")).await.unwrap();
        assert_eq!(actor.name(), "Sam Neill");
        assert!(actor.id().is_some());
    }

    #[tokio::test]
    async fn test_create_invalid_name() {
        let service = service();

        let result = service.create(create_request("")).await;
        assert_eq!(result.unwrap_err().to_string(), "Actor name invalid");
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let service = service();
        service.create(create_request("Sam Neill")).await.unwrap();

        let result = service.create(create_request("Sam Neill")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_change_applies_only_supplied_fields() {
        let service = service();
        service.create(create_request("Sam Neill")).await.unwrap();

        let request = UpdateActorRequest {
            bio: Some("Jurassic Park".to_string()),
            ..Default::default()
        };

        let actor = service.change("Sam Neill", request).await.unwrap();
        assert_eq!(actor.bio(), Some("Jurassic Park"));
        assert_eq!(actor.birth(), birth_date());
    }

    #[tokio::test]
    async fn test_change_missing_actor() {
        let service = service();

        let result = service.change("Sam Neill", UpdateActorRequest::default()).await;
        assert_eq!(result.unwrap_err().to_string(), "Actor does not exist");
    }

    #[tokio::test]
    async fn test_change_invalid_field_leaves_actor_untouched() {
        let service = service();
        service.create(create_request("Sam Neill")).await.unwrap();

        let request = UpdateActorRequest {
            bio: Some("a".repeat(3001)),
            ..Default::default()
        };

        let result = service.change("Sam Neill", request).await;
        assert_eq!(result.unwrap_err().to_string(), "Actor biography too long");

        let actor = service.show("Sam Neill").await.unwrap();
        assert!(actor.bio().is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let service = service();
        service.create(create_request("Sam Neill")).await.unwrap();

        service.remove("Sam Neill").await.unwrap();

        let result = service.show("Sam Neill").await;
        assert_eq!(result.unwrap_err().to_string(), "Actor does not exist");
    }

    #[tokio::test]
    async fn test_remove_missing() {
        let service = service();

        let result = service.remove("Sam Neill").await;
        assert_eq!(result.unwrap_err().to_string(), "Actor does not exist");
    }

    #[tokio::test]
    async fn test_list() {
        let service = service();
        service.create(create_request("Sam Neill")).await.unwrap();
        service.create(create_request("Al Pacino")).await.unwrap();

        let actors = service.list().await.unwrap();
        assert_eq!(actors.len(), 2);
    }
}
