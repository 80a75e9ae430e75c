//! In-memory genre repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::actor::ActorRepository;
use crate::domain::genre::{Genre, GenreRepository};
use crate::domain::movie::MovieRepository;
use crate::domain::DomainError;

/// In-memory implementation of [`GenreRepository`].
///
/// Membership is persisted by member name and rehydrated from the movie and
/// actor stores on every load. Members deleted from the catalogue drop out
/// of the genre.
#[derive(Debug)]
pub struct InMemoryGenreRepository {
    genres: Arc<RwLock<BTreeMap<String, Genre>>>,
    next_id: AtomicI64,
    movies: Arc<dyn MovieRepository>,
    actors: Arc<dyn ActorRepository>,
}

impl InMemoryGenreRepository {
    /// Create a new empty repository backed by the given member stores.
    pub fn new(movies: Arc<dyn MovieRepository>, actors: Arc<dyn ActorRepository>) -> Self {
        Self {
            genres: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
            movies,
            actors,
        }
    }

    async fn rehydrate(&self, genre: Genre) -> Result<Genre, DomainError> {
        let mut members = Vec::with_capacity(genre.movies().len());

        for movie in genre.movies() {
            if let Some(current) = self.movies.find_by_name(movie.name()).await? {
                members.push(current);
            }
        }

        let mut direct = Vec::with_capacity(genre.direct_actors().len());

        for actor in genre.direct_actors() {
            if let Some(current) = self.actors.find_by_name(actor.name()).await? {
                direct.push(current);
            }
        }

        Ok(Genre::restore(
            genre.id(),
            genre.name().to_string(),
            members,
            direct,
        ))
    }
}

#[async_trait]
impl GenreRepository for InMemoryGenreRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, DomainError> {
        let stored = {
            let genres = self.genres.read().await;
            genres.get(name).cloned()
        };

        match stored {
            Some(genre) => Ok(Some(self.rehydrate(genre).await?)),
            None => Ok(None),
        }
    }

    async fn add(&self, mut genre: Genre) -> Result<Genre, DomainError> {
        let mut genres = self.genres.write().await;

        if genres.contains_key(genre.name()) {
            return Err(DomainError::conflict(format!(
                "Genre '{}' already exists",
                genre.name()
            )));
        }

        genre.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        genres.insert(genre.name().to_string(), genre.clone());

        Ok(genre)
    }

    async fn update(&self, genre: &Genre) -> Result<Genre, DomainError> {
        let id = genre
            .id()
            .ok_or_else(|| DomainError::storage("Cannot update an unsaved genre"))?;

        let mut genres = self.genres.write().await;

        let old_name = genres
            .iter()
            .find(|(_, stored)| stored.id() == Some(id))
            .map(|(name, _)| name.clone())
            .ok_or_else(|| {
                DomainError::not_found(format!("Genre '{}' not found", genre.name()))
            })?;

        if old_name != genre.name() && genres.contains_key(genre.name()) {
            return Err(DomainError::conflict(format!(
                "Genre '{}' already exists",
                genre.name()
            )));
        }

        genres.remove(&old_name);
        genres.insert(genre.name().to_string(), genre.clone());

        Ok(genre.clone())
    }

    async fn remove(&self, genre: &Genre) -> Result<bool, DomainError> {
        let mut genres = self.genres.write().await;
        Ok(genres.remove(genre.name()).is_some())
    }

    async fn list(&self) -> Result<Vec<Genre>, DomainError> {
        let stored: Vec<Genre> = {
            let genres = self.genres.read().await;
            genres.values().cloned().collect()
        };

        let mut result = Vec::with_capacity(stored.len());

        for genre in stored {
            result.push(self.rehydrate(genre).await?);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Actor, Movie};
    use crate::infrastructure::actor::InMemoryActorRepository;
    use crate::infrastructure::movie::InMemoryMovieRepository;
    use chrono::{TimeZone, Utc};

    fn actor(name: &str) -> Actor {
        let birth = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        Actor::new(name, birth).unwrap()
    }

    struct Fixture {
        actors: Arc<InMemoryActorRepository>,
        movies: Arc<InMemoryMovieRepository>,
        genres: InMemoryGenreRepository,
    }

    fn setup() -> Fixture {
        let actors = Arc::new(InMemoryActorRepository::new());
        let movies = Arc::new(InMemoryMovieRepository::new(actors.clone()));
        let genres = InMemoryGenreRepository::new(movies.clone(), actors.clone());

        Fixture {
            actors,
            movies,
            genres,
        }
    }

    #[tokio::test]
    async fn test_add_and_find() {
        let f = setup();

        let saved = f.genres.add(Genre::new("Thriller").unwrap()).await.unwrap();
        assert!(saved.id().is_some());

        let found = f.genres.find_by_name("Thriller").await.unwrap().unwrap();
        assert_eq!(found.name(), "Thriller");
    }

    #[tokio::test]
    async fn test_add_duplicate_name() {
        let f = setup();
        f.genres.add(Genre::new("Thriller").unwrap()).await.unwrap();

        let result = f.genres.add(Genre::new("Thriller").unwrap()).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_members_reflect_later_roster_changes() {
        let f = setup();
        let pacino = f.actors.add(actor("Al Pacino")).await.unwrap();
        let heat = f.movies.add(Movie::new("Heat").unwrap()).await.unwrap();

        let mut genre = f.genres.add(Genre::new("Thriller").unwrap()).await.unwrap();
        genre.add_movie(&heat).unwrap();
        f.genres.update(&genre).await.unwrap();

        // Roster entry added after the movie joined the genre.
        let mut heat = f.movies.find_by_name("Heat").await.unwrap().unwrap();
        heat.add_actor("Hanna", &pacino).unwrap();
        f.movies.update(&heat).await.unwrap();

        let found = f.genres.find_by_name("Thriller").await.unwrap().unwrap();
        let names: Vec<&str> = found.all_actors().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Al Pacino"]);
    }

    #[tokio::test]
    async fn test_deleted_movie_drops_out() {
        let f = setup();
        let heat = f.movies.add(Movie::new("Heat").unwrap()).await.unwrap();

        let mut genre = f.genres.add(Genre::new("Thriller").unwrap()).await.unwrap();
        genre.add_movie(&heat).unwrap();
        f.genres.update(&genre).await.unwrap();

        f.movies.remove(&heat).await.unwrap();

        let found = f.genres.find_by_name("Thriller").await.unwrap().unwrap();
        assert!(found.movies().is_empty());
    }

    #[tokio::test]
    async fn test_list_ordered_by_name() {
        let f = setup();
        f.genres.add(Genre::new("Thriller").unwrap()).await.unwrap();
        f.genres.add(Genre::new("Comedy").unwrap()).await.unwrap();

        let names: Vec<String> = f
            .genres
            .list()
            .await
            .unwrap()
            .iter()
            .map(|g| g.name().to_string())
            .collect();

        assert_eq!(names, vec!["Comedy", "Thriller"]);
    }
}
