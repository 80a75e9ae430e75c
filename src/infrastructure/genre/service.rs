//! Genre service for catalogue management

use std::sync::Arc;

use crate::domain::actor::ActorRepository;
use crate::domain::genre::{Genre, GenreRepository};
use crate::domain::movie::MovieRepository;
use crate::domain::DomainError;

/// Use-case layer for genres: resolves member names through the movie and
/// actor repositories, then applies domain mutations.
#[derive(Debug)]
pub struct GenreService<G, M, A>
where
    G: GenreRepository,
    M: MovieRepository,
    A: ActorRepository,
{
    genres: Arc<G>,
    movies: Arc<M>,
    actors: Arc<A>,
}

impl<G, M, A> GenreService<G, M, A>
where
    G: GenreRepository,
    M: MovieRepository,
    A: ActorRepository,
{
    pub fn new(genres: Arc<G>, movies: Arc<M>, actors: Arc<A>) -> Self {
        Self {
            genres,
            movies,
            actors,
        }
    }

    /// Create a new genre with empty member lists.
    pub async fn create(&self, name: &str) -> Result<Genre, DomainError> {
        let genre = Genre::new(name)?;
        self.genres.add(genre).await
    }

    /// Add a movie to the genre's direct list.
    pub async fn add_movie(&self, name: &str, movie_name: &str) -> Result<Genre, DomainError> {
        let mut genre = self.show(name).await?;

        let movie = self
            .movies
            .find_by_name(movie_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Movie does not exist"))?;

        genre.add_movie(&movie)?;
        self.genres.update(&genre).await
    }

    /// Remove a movie from the genre's direct list.
    pub async fn remove_movie(&self, name: &str, movie_name: &str) -> Result<Genre, DomainError> {
        let mut genre = self.show(name).await?;

        let movie = self
            .movies
            .find_by_name(movie_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Movie does not exist"))?;

        genre.remove_movie(&movie)?;
        self.genres.update(&genre).await
    }

    /// Add an actor to the genre's direct list.
    pub async fn add_actor(&self, name: &str, actor_name: &str) -> Result<Genre, DomainError> {
        let mut genre = self.show(name).await?;

        let actor = self
            .actors
            .find_by_name(actor_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Actor does not exist"))?;

        genre.add_actor(&actor)?;
        self.genres.update(&genre).await
    }

    /// Remove an actor from the genre's direct list.
    pub async fn remove_actor(&self, name: &str, actor_name: &str) -> Result<Genre, DomainError> {
        let mut genre = self.show(name).await?;

        let actor = self
            .actors
            .find_by_name(actor_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Actor does not exist"))?;

        genre.remove_actor(&actor)?;
        self.genres.update(&genre).await
    }

    /// Delete a genre. Member movies and actors themselves are untouched.
    pub async fn remove(&self, name: &str) -> Result<(), DomainError> {
        let genre = self.show(name).await?;
        self.genres.remove(&genre).await?;
        Ok(())
    }

    /// Look up a genre by name.
    pub async fn show(&self, name: &str) -> Result<Genre, DomainError> {
        self.genres
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found("Genre does not exist"))
    }

    /// List all genres.
    pub async fn list(&self) -> Result<Vec<Genre>, DomainError> {
        self.genres.list().await
    }
}
