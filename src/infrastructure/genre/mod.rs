//! Genre infrastructure implementations

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresGenreRepository;
pub use repository::InMemoryGenreRepository;
pub use service::GenreService;
