//! User infrastructure implementations

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::Argon2Hasher;
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::UserService;
