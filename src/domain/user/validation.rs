//! User field validation

use crate::domain::DomainError;

const USERNAME_MIN: usize = 4;
const USERNAME_MAX: usize = 16;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 24;

/// Validate a username: 4-16 ASCII alphanumeric characters.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    let length = username.len();

    if length < USERNAME_MIN || length > USERNAME_MAX {
        return Err(DomainError::validation("User username invalid"));
    }

    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::validation("User username invalid"));
    }

    Ok(())
}

/// Validate a plaintext password: 8-24 characters. Checked before hashing;
/// the plaintext is never stored.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    let length = password.len();

    if length < PASSWORD_MIN || length > PASSWORD_MAX {
        return Err(DomainError::validation("User password invalid"));
    }

    Ok(())
}
