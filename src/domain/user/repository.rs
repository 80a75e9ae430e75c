//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::User;
use crate::domain::DomainError;

/// Repository trait for user storage.
///
/// Username and api-token uniqueness are enforced here; the entity never
/// checks cross-instance uniqueness.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Retrieve a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Retrieve a user by api token. Only matches users whose token is set.
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user and assign their identity.
    async fn add(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user.
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Remove a user. Returns whether anything was deleted.
    async fn remove(&self, user: &User) -> Result<bool, DomainError>;

    /// List all users ordered by username.
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}
