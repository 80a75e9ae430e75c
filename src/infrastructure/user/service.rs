//! User service for registration, authentication and favourites

use std::sync::Arc;

use crate::domain::movie::MovieRepository;
use crate::domain::user::{PasswordHasher, User, UserRepository};
use crate::domain::DomainError;

/// Use-case layer for users.
///
/// Passwords are hashed through the injected capability; only the digest
/// reaches the repository. Login rotates the bearer token, logout clears it.
#[derive(Debug)]
pub struct UserService<R, M, H>
where
    R: UserRepository,
    M: MovieRepository,
    H: PasswordHasher,
{
    users: Arc<R>,
    movies: Arc<M>,
    hasher: Arc<H>,
}

impl<R, M, H> UserService<R, M, H>
where
    R: UserRepository,
    M: MovieRepository,
    H: PasswordHasher,
{
    pub fn new(users: Arc<R>, movies: Arc<M>, hasher: Arc<H>) -> Self {
        Self {
            users,
            movies,
            hasher,
        }
    }

    /// Register a new user.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let user = User::new(username, password, self.hasher.as_ref())?;
        self.users.add(user).await
    }

    /// Verify credentials and rotate the api token.
    ///
    /// Returns `None` when the username is unknown or the password does not
    /// match; the caller turns that into an authentication failure.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, DomainError> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        let mut user = user;
        let token = user.generate_api_token().to_string();
        self.users.update(&user).await?;

        Ok(Some(token))
    }

    /// Clear the user's api token; the old token stops resolving.
    pub async fn logout(&self, user: &User) -> Result<(), DomainError> {
        let mut user = user.clone();
        user.clear_api_token();
        self.users.update(&user).await?;
        Ok(())
    }

    /// Resolve a bearer token to its user, if any.
    pub async fn authenticate_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        self.users.find_by_token(token).await
    }

    /// Add a movie to the user's favourites.
    pub async fn add_favourite(&self, user: &User, movie_name: &str) -> Result<User, DomainError> {
        let movie = self
            .movies
            .find_by_name(movie_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Movie does not exist"))?;

        let mut user = user.clone();
        user.add_favourite(&movie)?;
        self.users.update(&user).await
    }

    /// Remove a movie from the user's favourites.
    pub async fn remove_favourite(
        &self,
        user: &User,
        movie_name: &str,
    ) -> Result<User, DomainError> {
        let movie = self
            .movies
            .find_by_name(movie_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Movie does not exist"))?;

        let mut user = user.clone();
        user.remove_favourite(&movie)?;
        self.users.update(&user).await
    }

    /// Look up a user by username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.users.find_by_username(username).await
    }

    /// List all users.
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.users.list().await
    }
}
