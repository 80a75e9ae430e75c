//! Domain layer - catalogue entities and the invariants they enforce

pub mod actor;
pub mod error;
pub mod genre;
pub mod movie;
pub mod user;
pub mod validation;

pub use actor::{Actor, ActorRepository};
pub use error::DomainError;
pub use genre::{Genre, GenreRepository};
pub use movie::{Movie, MovieRepository, Role};
pub use user::{PasswordHasher, User, UserRepository};
