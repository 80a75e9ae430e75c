//! Actor infrastructure implementations

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresActorRepository;
pub use repository::InMemoryActorRepository;
pub use service::{ActorService, CreateActorRequest, UpdateActorRequest};
