//! Password hashing capability consumed by the domain.
//!
//! The implementation lives in the infrastructure layer and is injected at
//! construction time; the domain never reaches for it through global state.

use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for password hashing operations.
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a plaintext password into an opaque digest.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a plaintext password against a stored digest.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
