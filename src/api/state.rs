//! Application state for shared services

use std::sync::Arc;

use crate::domain::actor::{Actor, ActorRepository};
use crate::domain::genre::{Genre, GenreRepository};
use crate::domain::movie::{Movie, MovieRepository};
use crate::domain::user::{PasswordHasher, User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::actor::{ActorService, CreateActorRequest, UpdateActorRequest};
use crate::infrastructure::genre::GenreService;
use crate::infrastructure::movie::{MovieService, UpdateMovieRequest};
use crate::infrastructure::user::UserService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub actor_service: Arc<dyn ActorServiceTrait>,
    pub movie_service: Arc<dyn MovieServiceTrait>,
    pub genre_service: Arc<dyn GenreServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(
        actor_service: Arc<dyn ActorServiceTrait>,
        movie_service: Arc<dyn MovieServiceTrait>,
        genre_service: Arc<dyn GenreServiceTrait>,
        user_service: Arc<dyn UserServiceTrait>,
    ) -> Self {
        Self {
            actor_service,
            movie_service,
            genre_service,
            user_service,
        }
    }
}

/// Trait for actor service operations
#[async_trait::async_trait]
pub trait ActorServiceTrait: Send + Sync {
    async fn create(&self, request: CreateActorRequest) -> Result<Actor, DomainError>;
    async fn change(&self, name: &str, request: UpdateActorRequest) -> Result<Actor, DomainError>;
    async fn remove(&self, name: &str) -> Result<(), DomainError>;
    async fn show(&self, name: &str) -> Result<Actor, DomainError>;
    async fn list(&self) -> Result<Vec<Actor>, DomainError>;
}

/// Trait for movie service operations
#[async_trait::async_trait]
pub trait MovieServiceTrait: Send + Sync {
    async fn create(&self, name: &str) -> Result<Movie, DomainError>;
    async fn change(&self, name: &str, request: UpdateMovieRequest) -> Result<Movie, DomainError>;
    async fn add_actor(
        &self,
        name: &str,
        character: &str,
        actor_name: &str,
    ) -> Result<Movie, DomainError>;
    async fn remove_actor(&self, name: &str, actor_name: &str) -> Result<Movie, DomainError>;
    async fn remove(&self, name: &str) -> Result<(), DomainError>;
    async fn show(&self, name: &str) -> Result<Movie, DomainError>;
    async fn list(&self) -> Result<Vec<Movie>, DomainError>;
}

/// Trait for genre service operations
#[async_trait::async_trait]
pub trait GenreServiceTrait: Send + Sync {
    async fn create(&self, name: &str) -> Result<Genre, DomainError>;
    async fn add_movie(&self, name: &str, movie_name: &str) -> Result<Genre, DomainError>;
    async fn remove_movie(&self, name: &str, movie_name: &str) -> Result<Genre, DomainError>;
    async fn add_actor(&self, name: &str, actor_name: &str) -> Result<Genre, DomainError>;
    async fn remove_actor(&self, name: &str, actor_name: &str) -> Result<Genre, DomainError>;
    async fn remove(&self, name: &str) -> Result<(), DomainError>;
    async fn show(&self, name: &str) -> Result<Genre, DomainError>;
    async fn list(&self) -> Result<Vec<Genre>, DomainError>;
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, username: &str, password: &str) -> Result<User, DomainError>;
    async fn login(&self, username: &str, password: &str) -> Result<Option<String>, DomainError>;
    async fn logout(&self, user: &User) -> Result<(), DomainError>;
    async fn authenticate_token(&self, token: &str) -> Result<Option<User>, DomainError>;
    async fn add_favourite(&self, user: &User, movie_name: &str) -> Result<User, DomainError>;
    async fn remove_favourite(&self, user: &User, movie_name: &str) -> Result<User, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}

// Implement the traits for the actual services

#[async_trait::async_trait]
impl<R: ActorRepository + 'static> ActorServiceTrait for ActorService<R> {
    async fn create(&self, request: CreateActorRequest) -> Result<Actor, DomainError> {
        ActorService::create(self, request).await
    }

    async fn change(&self, name: &str, request: UpdateActorRequest) -> Result<Actor, DomainError> {
        ActorService::change(self, name, request).await
    }

    async fn remove(&self, name: &str) -> Result<(), DomainError> {
        ActorService::remove(self, name).await
    }

    async fn show(&self, name: &str) -> Result<Actor, DomainError> {
        ActorService::show(self, name).await
    }

    async fn list(&self) -> Result<Vec<Actor>, DomainError> {
        ActorService::list(self).await
    }
}

#[async_trait::async_trait]
impl<M, G, A> MovieServiceTrait for MovieService<M, G, A>
where
    M: MovieRepository + 'static,
    G: GenreRepository + 'static,
    A: ActorRepository + 'static,
{
    async fn create(&self, name: &str) -> Result<Movie, DomainError> {
        MovieService::create(self, name).await
    }

    async fn change(&self, name: &str, request: UpdateMovieRequest) -> Result<Movie, DomainError> {
        MovieService::change(self, name, request).await
    }

    async fn add_actor(
        &self,
        name: &str,
        character: &str,
        actor_name: &str,
    ) -> Result<Movie, DomainError> {
        MovieService::add_actor(self, name, character, actor_name).await
    }

    async fn remove_actor(&self, name: &str, actor_name: &str) -> Result<Movie, DomainError> {
        MovieService::remove_actor(self, name, actor_name).await
    }

    async fn remove(&self, name: &str) -> Result<(), DomainError> {
        MovieService::remove(self, name).await
    }

    async fn show(&self, name: &str) -> Result<Movie, DomainError> {
        MovieService::show(self, name).await
    }

    async fn list(&self) -> Result<Vec<Movie>, DomainError> {
        MovieService::list(self).await
    }
}

#[async_trait::async_trait]
impl<G, M, A> GenreServiceTrait for GenreService<G, M, A>
where
    G: GenreRepository + 'static,
    M: MovieRepository + 'static,
    A: ActorRepository + 'static,
{
    async fn create(&self, name: &str) -> Result<Genre, DomainError> {
        GenreService::create(self, name).await
    }

    async fn add_movie(&self, name: &str, movie_name: &str) -> Result<Genre, DomainError> {
        GenreService::add_movie(self, name, movie_name).await
    }

    async fn remove_movie(&self, name: &str, movie_name: &str) -> Result<Genre, DomainError> {
        GenreService::remove_movie(self, name, movie_name).await
    }

    async fn add_actor(&self, name: &str, actor_name: &str) -> Result<Genre, DomainError> {
        GenreService::add_actor(self, name, actor_name).await
    }

    async fn remove_actor(&self, name: &str, actor_name: &str) -> Result<Genre, DomainError> {
        GenreService::remove_actor(self, name, actor_name).await
    }

    async fn remove(&self, name: &str) -> Result<(), DomainError> {
        GenreService::remove(self, name).await
    }

    async fn show(&self, name: &str) -> Result<Genre, DomainError> {
        GenreService::show(self, name).await
    }

    async fn list(&self) -> Result<Vec<Genre>, DomainError> {
        GenreService::list(self).await
    }
}

#[async_trait::async_trait]
impl<R, M, H> UserServiceTrait for UserService<R, M, H>
where
    R: UserRepository + 'static,
    M: MovieRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, username: &str, password: &str) -> Result<User, DomainError> {
        UserService::register(self, username, password).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<Option<String>, DomainError> {
        UserService::login(self, username, password).await
    }

    async fn logout(&self, user: &User) -> Result<(), DomainError> {
        UserService::logout(self, user).await
    }

    async fn authenticate_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        UserService::authenticate_token(self, token).await
    }

    async fn add_favourite(&self, user: &User, movie_name: &str) -> Result<User, DomainError> {
        UserService::add_favourite(self, user, movie_name).await
    }

    async fn remove_favourite(&self, user: &User, movie_name: &str) -> Result<User, DomainError> {
        UserService::remove_favourite(self, user, movie_name).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        UserService::list(self).await
    }
}
