//! User domain model

mod entity;
mod hasher;
mod repository;
mod validation;

pub use entity::User;
pub use hasher::PasswordHasher;
pub use repository::UserRepository;
pub use validation::{validate_password, validate_username};
