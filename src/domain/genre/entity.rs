//! Genre entity

use crate::domain::validation::validate_length;
use crate::domain::{Actor, DomainError, Movie};

const NAME_MAX: usize = 255;

/// A style/category of movies.
///
/// Holds a direct list of movies and a direct list of actors. Membership is
/// decided by name equality, never by instance identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    id: Option<i64>,
    name: String,
    movies: Vec<Movie>,
    actors: Vec<Actor>,
}

impl Genre {
    /// Create a new genre with empty member lists.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let mut genre = Self {
            id: None,
            name: String::new(),
            movies: Vec::new(),
            actors: Vec::new(),
        };

        genre.set_name(name)?;

        Ok(genre)
    }

    /// Rebuild a persisted genre. Stored values were validated on the way in.
    pub(crate) fn restore(
        id: Option<i64>,
        name: String,
        movies: Vec<Movie>,
        actors: Vec<Actor>,
    ) -> Self {
        Self {
            id,
            name,
            movies,
            actors,
        }
    }

    /// Persistence-assigned identity; `None` until first saved.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Movies within this genre, in insertion order.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Actors added to this genre directly, in insertion order.
    ///
    /// Distinct from actors reachable through the genre's movies; see
    /// [`Genre::all_actors`].
    pub fn direct_actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Every actor associated with this genre.
    ///
    /// Recomputed on each call: actors appearing in any member movie's
    /// roster (movie order, then roster order) followed by the direct
    /// actors, de-duplicated by name keeping the first occurrence.
    pub fn all_actors(&self) -> Vec<&Actor> {
        let mut seen: Vec<&str> = Vec::new();
        let mut result: Vec<&Actor> = Vec::new();

        let movie_actors = self
            .movies
            .iter()
            .flat_map(|movie| movie.roles().iter().map(|role| role.actor()));

        for actor in movie_actors.chain(self.actors.iter()) {
            if seen.contains(&actor.name()) {
                continue;
            }

            seen.push(actor.name());
            result.push(actor);
        }

        result
    }

    /// Validates that the name is between 1 and 255 bytes.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();

        if !validate_length(&name, 1, NAME_MAX) {
            return Err(DomainError::validation("Genre name invalid"));
        }

        self.name = name;
        Ok(())
    }

    /// Attempts to add the movie to this genre.
    pub fn add_movie(&mut self, movie: &Movie) -> Result<(), DomainError> {
        if self.movies.iter().any(|member| member.name() == movie.name()) {
            return Err(DomainError::validation("Movie already within genre"));
        }

        self.movies.push(movie.clone());
        Ok(())
    }

    /// Attempts to remove the movie from this genre.
    pub fn remove_movie(&mut self, movie: &Movie) -> Result<(), DomainError> {
        let position = self
            .movies
            .iter()
            .position(|member| member.name() == movie.name());

        match position {
            Some(index) => {
                self.movies.remove(index);
                Ok(())
            }
            None => Err(DomainError::validation("Movie not within genre")),
        }
    }

    /// Attempts to add the actor to this genre's direct list.
    pub fn add_actor(&mut self, actor: &Actor) -> Result<(), DomainError> {
        if self.actors.iter().any(|member| member.name() == actor.name()) {
            return Err(DomainError::validation("Actor already within genre"));
        }

        self.actors.push(actor.clone());
        Ok(())
    }

    /// Attempts to remove the actor from this genre's direct list.
    ///
    /// Actors reachable only through member movies are not considered.
    pub fn remove_actor(&mut self, actor: &Actor) -> Result<(), DomainError> {
        let position = self
            .actors
            .iter()
            .position(|member| member.name() == actor.name());

        match position {
            Some(index) => {
                self.actors.remove(index);
                Ok(())
            }
            None => Err(DomainError::validation("Actor not within genre")),
        }
    }
}
