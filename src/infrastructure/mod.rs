//! Infrastructure layer - repositories, hashing and service implementations

pub mod actor;
pub mod genre;
pub mod logging;
pub mod movie;
pub mod user;
