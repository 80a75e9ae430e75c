//! User entity

use rand::distributions::Alphanumeric;
use rand::Rng;

use super::hasher::PasswordHasher;
use super::validation::{validate_password, validate_username};
use crate::domain::{DomainError, Movie};

const API_TOKEN_LENGTH: usize = 60;

/// An account that can authenticate and keep a list of favourite movies.
///
/// Only the password hash is ever stored; hashing is performed by the
/// injected [`PasswordHasher`] capability.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: Option<i64>,
    username: String,
    password_hash: String,
    api_token: Option<String>,
    favourites: Vec<Movie>,
}

impl User {
    /// Create a new user. Username and password are validated before the
    /// password is hashed.
    pub fn new(
        username: impl Into<String>,
        password: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<Self, DomainError> {
        let username = username.into();

        validate_username(&username)?;
        validate_password(password)?;

        Ok(Self {
            id: None,
            username,
            password_hash: hasher.hash(password)?,
            api_token: None,
            favourites: Vec::new(),
        })
    }

    /// Rebuild a persisted user. Stored values were validated on the way in.
    pub(crate) fn restore(
        id: Option<i64>,
        username: String,
        password_hash: String,
        api_token: Option<String>,
        favourites: Vec<Movie>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            api_token,
            favourites,
        }
    }

    /// Persistence-assigned identity; `None` until first saved.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// The current bearer token, if the user is logged in.
    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    /// Favourite movies, in insertion order.
    pub fn favourites(&self) -> &[Movie] {
        &self.favourites
    }

    /// Replace the api token with a fresh random one.
    ///
    /// No uniqueness check happens here; token uniqueness is a persistence
    /// constraint.
    pub fn generate_api_token(&mut self) -> &str {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(API_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        self.api_token.insert(token).as_str()
    }

    /// Clear the api token. Token lookups for this user must fail afterwards.
    pub fn clear_api_token(&mut self) {
        self.api_token = None;
    }

    /// Attempts to add the movie to this user's favourites.
    pub fn add_favourite(&mut self, movie: &Movie) -> Result<(), DomainError> {
        if self
            .favourites
            .iter()
            .any(|member| member.name() == movie.name())
        {
            return Err(DomainError::validation("Movie already favourited"));
        }

        self.favourites.push(movie.clone());
        Ok(())
    }

    /// Attempts to remove the movie from this user's favourites.
    pub fn remove_favourite(&mut self, movie: &Movie) -> Result<(), DomainError> {
        let position = self
            .favourites
            .iter()
            .position(|member| member.name() == movie.name());

        match position {
            Some(index) => {
                self.favourites.remove(index);
                Ok(())
            }
            None => Err(DomainError::validation("Movie not favourited")),
        }
    }
}
