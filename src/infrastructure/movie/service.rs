//! Movie service for catalogue management

use std::sync::Arc;

use crate::domain::actor::ActorRepository;
use crate::domain::genre::GenreRepository;
use crate::domain::movie::{Movie, MovieRepository};
use crate::domain::DomainError;

/// A rating given by one user; the username is the authenticated identity.
#[derive(Debug, Clone)]
pub struct UserRating {
    pub username: String,
    pub value: i32,
}

/// Request for changing an existing movie; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateMovieRequest {
    pub genre: Option<String>,
    pub rating: Option<UserRating>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Use-case layer for movies: resolves movie, genre and actor names through
/// their repositories, then applies domain mutations and persists the whole
/// aggregate.
#[derive(Debug)]
pub struct MovieService<M, G, A>
where
    M: MovieRepository,
    G: GenreRepository,
    A: ActorRepository,
{
    movies: Arc<M>,
    genres: Arc<G>,
    actors: Arc<A>,
}

impl<M, G, A> MovieService<M, G, A>
where
    M: MovieRepository,
    G: GenreRepository,
    A: ActorRepository,
{
    pub fn new(movies: Arc<M>, genres: Arc<G>, actors: Arc<A>) -> Self {
        Self {
            movies,
            genres,
            actors,
        }
    }

    /// Create a new movie. Genre, roster and ratings all start empty.
    pub async fn create(&self, name: &str) -> Result<Movie, DomainError> {
        let movie = Movie::new(name)?;
        self.movies.add(movie).await
    }

    /// Apply the supplied changes to an existing movie.
    pub async fn change(
        &self,
        name: &str,
        request: UpdateMovieRequest,
    ) -> Result<Movie, DomainError> {
        let mut movie = self.show(name).await?;

        if let Some(genre_name) = request.genre {
            let genre = self
                .genres
                .find_by_name(&genre_name)
                .await?
                .ok_or_else(|| DomainError::not_found("Genre does not exist"))?;

            movie.set_genre(&genre);
        }

        if let Some(rating) = request.rating {
            movie.add_rating(rating.username, rating.value)?;
        }

        if let Some(description) = request.description {
            movie.set_description(Some(description))?;
        }

        if let Some(image) = request.image {
            movie.set_image(Some(image))?;
        }

        self.movies.update(&movie).await
    }

    /// Add an actor to the movie's roster under the given character.
    pub async fn add_actor(
        &self,
        name: &str,
        character: &str,
        actor_name: &str,
    ) -> Result<Movie, DomainError> {
        let mut movie = self.show(name).await?;

        let actor = self
            .actors
            .find_by_name(actor_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Actor does not exist"))?;

        movie.add_actor(character, &actor)?;
        self.movies.update(&movie).await
    }

    /// Remove every role the actor plays in this movie.
    pub async fn remove_actor(&self, name: &str, actor_name: &str) -> Result<Movie, DomainError> {
        let mut movie = self.show(name).await?;

        let actor = self
            .actors
            .find_by_name(actor_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Actor does not exist"))?;

        movie.remove_actor(&actor)?;
        self.movies.update(&movie).await
    }

    /// Delete a movie from the catalogue.
    pub async fn remove(&self, name: &str) -> Result<(), DomainError> {
        let movie = self.show(name).await?;
        self.movies.remove(&movie).await?;
        Ok(())
    }

    /// Look up a movie by name.
    pub async fn show(&self, name: &str) -> Result<Movie, DomainError> {
        self.movies
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found("Movie does not exist"))
    }

    /// List all movies.
    pub async fn list(&self) -> Result<Vec<Movie>, DomainError> {
        self.movies.list().await
    }
}
