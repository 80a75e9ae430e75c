//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::movie::MovieRepository;
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of [`UserRepository`].
///
/// Keeps a token index in sync with updates so bearer-token lookups stay
/// O(1), and rehydrates favourites from the movie store on load.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<String, User>>>,
    /// Index for api token -> username lookup.
    token_index: Arc<RwLock<HashMap<String, String>>>,
    next_id: AtomicI64,
    movies: Arc<dyn MovieRepository>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository backed by the given movie store.
    pub fn new(movies: Arc<dyn MovieRepository>) -> Self {
        Self {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            token_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
            movies,
        }
    }

    async fn rehydrate(&self, user: User) -> Result<User, DomainError> {
        let mut favourites = Vec::with_capacity(user.favourites().len());

        for movie in user.favourites() {
            if let Some(current) = self.movies.find_by_name(movie.name()).await? {
                favourites.push(current);
            }
        }

        Ok(User::restore(
            user.id(),
            user.username().to_string(),
            user.password_hash().to_string(),
            user.api_token().map(String::from),
            favourites,
        ))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let stored = {
            let users = self.users.read().await;
            users.get(username).cloned()
        };

        match stored {
            Some(user) => Ok(Some(self.rehydrate(user).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let username = {
            let token_index = self.token_index.read().await;
            token_index.get(token).cloned()
        };

        match username {
            Some(username) => self.find_by_username(&username).await,
            None => Ok(None),
        }
    }

    async fn add(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut token_index = self.token_index.write().await;

        if users.contains_key(user.username()) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        if let Some(token) = user.api_token() {
            if token_index.contains_key(token) {
                return Err(DomainError::conflict("Api token already in use"));
            }

            token_index.insert(token.to_string(), user.username().to_string());
        }

        user.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        users.insert(user.username().to_string(), user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut token_index = self.token_index.write().await;

        let old_user = users.get(user.username()).ok_or_else(|| {
            DomainError::not_found(format!("User '{}' not found", user.username()))
        })?;

        if old_user.api_token() != user.api_token() {
            if let Some(token) = user.api_token() {
                if token_index.contains_key(token) {
                    return Err(DomainError::conflict("Api token already in use"));
                }
            }

            if let Some(old_token) = old_user.api_token() {
                token_index.remove(old_token);
            }

            if let Some(token) = user.api_token() {
                token_index.insert(token.to_string(), user.username().to_string());
            }
        }

        users.insert(user.username().to_string(), user.clone());

        Ok(user.clone())
    }

    async fn remove(&self, user: &User) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let mut token_index = self.token_index.write().await;

        if let Some(removed) = users.remove(user.username()) {
            if let Some(token) = removed.api_token() {
                token_index.remove(token);
            }

            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let stored: Vec<User> = {
            let users = self.users.read().await;
            users.values().cloned().collect()
        };

        let mut result = Vec::with_capacity(stored.len());

        for user in stored {
            result.push(self.rehydrate(user).await?);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::PasswordHasher;
    use crate::domain::Movie;
    use crate::infrastructure::actor::InMemoryActorRepository;
    use crate::infrastructure::movie::InMemoryMovieRepository;

    #[derive(Debug)]
    struct FakeHasher;

    impl PasswordHasher for FakeHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            hash == format!("hashed:{password}")
        }
    }

    fn user(username: &str) -> User {
        User::new(username, "password123", &FakeHasher).unwrap()
    }

    fn setup() -> (Arc<InMemoryMovieRepository>, InMemoryUserRepository) {
        let actors = Arc::new(InMemoryActorRepository::new());
        let movies = Arc::new(InMemoryMovieRepository::new(actors));
        let users = InMemoryUserRepository::new(movies.clone());
        (movies, users)
    }

    #[tokio::test]
    async fn test_add_and_find_by_username() {
        let (_, repo) = setup();

        let saved = repo.add(user("fred1E")).await.unwrap();
        assert!(saved.id().is_some());

        let found = repo.find_by_username("fred1E").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let (_, repo) = setup();
        repo.add(user("fred1E")).await.unwrap();

        let result = repo.add(user("fred1E")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_find_by_token() {
        let (_, repo) = setup();
        let mut saved = repo.add(user("fred1E")).await.unwrap();

        let token = saved.generate_api_token().to_string();
        repo.update(&saved).await.unwrap();

        let found = repo.find_by_token(&token).await.unwrap();
        assert_eq!(found.unwrap().username(), "fred1E");
    }

    #[tokio::test]
    async fn test_cleared_token_no_longer_resolves() {
        let (_, repo) = setup();
        let mut saved = repo.add(user("fred1E")).await.unwrap();

        let token = saved.generate_api_token().to_string();
        repo.update(&saved).await.unwrap();

        saved.clear_api_token();
        repo.update(&saved).await.unwrap();

        assert!(repo.find_by_token(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rotated_token_invalidates_old_one() {
        let (_, repo) = setup();
        let mut saved = repo.add(user("fred1E")).await.unwrap();

        let first = saved.generate_api_token().to_string();
        repo.update(&saved).await.unwrap();

        let second = saved.generate_api_token().to_string();
        repo.update(&saved).await.unwrap();

        assert!(repo.find_by_token(&first).await.unwrap().is_none());
        assert!(repo.find_by_token(&second).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_favourites_rehydrated_from_movie_store() {
        let (movies, repo) = setup();
        let heat = movies.add(Movie::new("Heat").unwrap()).await.unwrap();

        let mut saved = repo.add(user("fred1E")).await.unwrap();
        saved.add_favourite(&heat).unwrap();
        repo.update(&saved).await.unwrap();

        // Rate the movie after it was favourited.
        let mut heat = movies.find_by_name("Heat").await.unwrap().unwrap();
        heat.add_rating("someone", 4).unwrap();
        movies.update(&heat).await.unwrap();

        let found = repo.find_by_username("fred1E").await.unwrap().unwrap();
        assert_eq!(found.favourites()[0].rating(), 4.0);
    }

    #[tokio::test]
    async fn test_remove_clears_token_index() {
        let (_, repo) = setup();
        let mut saved = repo.add(user("fred1E")).await.unwrap();

        let token = saved.generate_api_token().to_string();
        repo.update(&saved).await.unwrap();

        assert!(repo.remove(&saved).await.unwrap());
        assert!(repo.find_by_token(&token).await.unwrap().is_none());
    }
}
