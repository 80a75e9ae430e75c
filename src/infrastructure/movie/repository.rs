//! In-memory movie repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::actor::ActorRepository;
use crate::domain::movie::{Movie, MovieRepository, Role};
use crate::domain::DomainError;

/// In-memory implementation of [`MovieRepository`].
///
/// Roster entries are persisted by actor name and rehydrated from the actor
/// repository on every load, so roster actors always reflect their current
/// state. Roles whose actor has been deleted from the catalogue drop out.
#[derive(Debug)]
pub struct InMemoryMovieRepository {
    movies: Arc<RwLock<BTreeMap<String, Movie>>>,
    next_id: AtomicI64,
    actors: Arc<dyn ActorRepository>,
}

impl InMemoryMovieRepository {
    /// Create a new empty repository backed by the given actor store.
    pub fn new(actors: Arc<dyn ActorRepository>) -> Self {
        Self {
            movies: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
            actors,
        }
    }

    async fn rehydrate(&self, movie: Movie) -> Result<Movie, DomainError> {
        let mut roster = Vec::with_capacity(movie.roles().len());

        for role in movie.roles() {
            if let Some(actor) = self.actors.find_by_name(role.actor().name()).await? {
                roster.push(Role::new(role.character().to_string(), actor));
            }
        }

        Ok(Movie::restore(
            movie.id(),
            movie.name().to_string(),
            movie.genre().map(String::from),
            roster,
            movie.ratings().clone(),
            movie.description().map(String::from),
            movie.image().map(String::from),
        ))
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Movie>, DomainError> {
        let stored = {
            let movies = self.movies.read().await;
            movies.get(name).cloned()
        };

        match stored {
            Some(movie) => Ok(Some(self.rehydrate(movie).await?)),
            None => Ok(None),
        }
    }

    async fn add(&self, mut movie: Movie) -> Result<Movie, DomainError> {
        let mut movies = self.movies.write().await;

        if movies.contains_key(movie.name()) {
            return Err(DomainError::conflict(format!(
                "Movie '{}' already exists",
                movie.name()
            )));
        }

        movie.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        movies.insert(movie.name().to_string(), movie.clone());

        Ok(movie)
    }

    async fn update(&self, movie: &Movie) -> Result<Movie, DomainError> {
        let id = movie
            .id()
            .ok_or_else(|| DomainError::storage("Cannot update an unsaved movie"))?;

        let mut movies = self.movies.write().await;

        let old_name = movies
            .iter()
            .find(|(_, stored)| stored.id() == Some(id))
            .map(|(name, _)| name.clone())
            .ok_or_else(|| {
                DomainError::not_found(format!("Movie '{}' not found", movie.name()))
            })?;

        if old_name != movie.name() && movies.contains_key(movie.name()) {
            return Err(DomainError::conflict(format!(
                "Movie '{}' already exists",
                movie.name()
            )));
        }

        movies.remove(&old_name);
        movies.insert(movie.name().to_string(), movie.clone());

        Ok(movie.clone())
    }

    async fn remove(&self, movie: &Movie) -> Result<bool, DomainError> {
        let mut movies = self.movies.write().await;
        Ok(movies.remove(movie.name()).is_some())
    }

    async fn list(&self) -> Result<Vec<Movie>, DomainError> {
        let stored: Vec<Movie> = {
            let movies = self.movies.read().await;
            movies.values().cloned().collect()
        };

        let mut result = Vec::with_capacity(stored.len());

        for movie in stored {
            result.push(self.rehydrate(movie).await?);
        }

        Ok(result)
    }
}
