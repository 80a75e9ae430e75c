//! Actor entity

use chrono::{DateTime, Utc};

use crate::domain::validation::validate_length;
use crate::domain::DomainError;

const NAME_MAX: usize = 255;
const BIO_MAX: usize = 3000;
const IMAGE_MAX: usize = 512_000;

/// A person that can appear in movie rosters.
///
/// Actors never reference movies or genres back; those relationships are
/// owned by the other side.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    id: Option<i64>,
    name: String,
    birth: DateTime<Utc>,
    bio: Option<String>,
    image: Option<String>,
}

impl Actor {
    /// Create a new actor, validating name and birth date.
    pub fn new(name: impl Into<String>, birth: DateTime<Utc>) -> Result<Self, DomainError> {
        let mut actor = Self {
            id: None,
            name: String::new(),
            birth,
            bio: None,
            image: None,
        };

        actor.set_name(name)?;
        actor.set_birth(birth)?;

        Ok(actor)
    }

    /// Rebuild a persisted actor. Stored values were validated on the way in.
    pub(crate) fn restore(
        id: Option<i64>,
        name: String,
        birth: DateTime<Utc>,
        bio: Option<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            birth,
            bio,
            image,
        }
    }

    /// Persistence-assigned identity; `None` until first saved.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth(&self) -> DateTime<Utc> {
        self.birth
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Validates that the name is between 1 and 255 bytes.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();

        if !validate_length(&name, 1, NAME_MAX) {
            return Err(DomainError::validation("Actor name invalid"));
        }

        self.name = name;
        Ok(())
    }

    /// Validates that the birth is in the past, compared in UTC.
    pub fn set_birth(&mut self, birth: DateTime<Utc>) -> Result<(), DomainError> {
        if birth > Utc::now() {
            return Err(DomainError::validation("Birth must be in the past"));
        }

        self.birth = birth;
        Ok(())
    }

    /// Provides 3000 bytes for biography.
    pub fn set_bio(&mut self, bio: Option<String>) -> Result<(), DomainError> {
        if let Some(ref value) = bio {
            if !validate_length(value, 0, BIO_MAX) {
                return Err(DomainError::validation("Actor biography too long"));
            }
        }

        self.bio = bio;
        Ok(())
    }

    /// Allows up to ~500kB of encoded image data.
    pub fn set_image(&mut self, image: Option<String>) -> Result<(), DomainError> {
        if let Some(ref value) = image {
            if !validate_length(value, 0, IMAGE_MAX) {
                return Err(DomainError::validation("Actor image too large"));
            }
        }

        self.image = image;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1977, 6, 4, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_new_actor() {
        let actor = Actor::new("Sam Neill", birth_date()).unwrap();

        assert_eq!(actor.name(), "Sam Neill");
        assert_eq!(actor.birth(), birth_date());
        assert!(actor.bio().is_none());
        assert!(actor.image().is_none());
        assert!(actor.id().is_none());
    }

    #[test]
    fn test_name_round_trips_at_bounds() {
        let short = Actor::new("a", birth_date()).unwrap();
        assert_eq!(short.name(), "a");

        let long_name = "a".repeat(255);
        let long = Actor::new(long_name.clone(), birth_date()).unwrap();
        assert_eq!(long.name(), long_name);
    }

    #[test]
    fn test_name_empty() {
        let result = Actor::new("", birth_date());
        assert_eq!(result.unwrap_err().to_string(), "Actor name invalid");
    }

    #[test]
    fn test_name_too_long() {
        let result = Actor::new("a".repeat(256), birth_date());
        assert_eq!(result.unwrap_err().to_string(), "Actor name invalid");
    }

    #[test]
    fn test_birth_in_future() {
        let future = Utc::now() + chrono::Duration::days(1);
        let result = Actor::new("Sam Neill", future);
        assert_eq!(result.unwrap_err().to_string(), "Birth must be in the past");
    }

    #[test]
    fn test_birth_now_is_allowed() {
        // "now" is not in the future.
        let actor = Actor::new("Sam Neill", Utc::now());
        assert!(actor.is_ok());
    }

    #[test]
    fn test_failed_setter_leaves_entity_unchanged() {
        let mut actor = Actor::new("Sam Neill", birth_date()).unwrap();

        assert!(actor.set_name("").is_err());
        assert_eq!(actor.name(), "Sam Neill");

        let future = Utc::now() + chrono::Duration::days(1);
        assert!(actor.set_birth(future).is_err());
        assert_eq!(actor.birth(), birth_date());
    }

    #[test]
    fn test_bio_bounds() {
        let mut actor = Actor::new("Sam Neill", birth_date()).unwrap();

        actor.set_bio(Some("a".repeat(3000))).unwrap();
        assert_eq!(actor.bio().unwrap().len(), 3000);

        let result = actor.set_bio(Some("a".repeat(3001)));
        assert_eq!(result.unwrap_err().to_string(), "Actor biography too long");
        assert_eq!(actor.bio().unwrap().len(), 3000);

        actor.set_bio(None).unwrap();
        assert!(actor.bio().is_none());
    }

    #[test]
    fn test_image_bounds() {
        let mut actor = Actor::new("Sam Neill", birth_date()).unwrap();

        actor.set_image(Some("x".repeat(512_000))).unwrap();

        let result = actor.set_image(Some("x".repeat(512_001)));
        assert_eq!(result.unwrap_err().to_string(), "Actor image too large");

        actor.set_image(None).unwrap();
        assert!(actor.image().is_none());
    }
}
