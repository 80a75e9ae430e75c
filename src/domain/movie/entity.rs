//! Movie entity and roster types

use std::collections::HashMap;

use crate::domain::genre::Genre;
use crate::domain::validation::validate_length;
use crate::domain::{Actor, DomainError};

const NAME_MAX: usize = 255;
const DESCRIPTION_MAX: usize = 3000;
const IMAGE_MAX: usize = 512_000;

/// A single role assignment: one character played by one actor.
///
/// The same actor may appear in several roles of the same movie, but never
/// twice under the identical character name.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    character: String,
    actor: Actor,
}

impl Role {
    pub(crate) fn new(character: String, actor: Actor) -> Self {
        Self { character, actor }
    }

    pub fn character(&self) -> &str {
        &self.character
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// A film record.
///
/// Owns its roster of roles and a per-user rating map. The genre is held as
/// a name reference; the member objects live on the genre side.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    id: Option<i64>,
    name: String,
    genre: Option<String>,
    roster: Vec<Role>,
    ratings: HashMap<String, i32>,
    description: Option<String>,
    image: Option<String>,
}

impl Movie {
    /// Create a new movie. Everything except the name starts empty.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let mut movie = Self {
            id: None,
            name: String::new(),
            genre: None,
            roster: Vec::new(),
            ratings: HashMap::new(),
            description: None,
            image: None,
        };

        movie.set_name(name)?;

        Ok(movie)
    }

    /// Rebuild a persisted movie. Stored values were validated on the way in.
    pub(crate) fn restore(
        id: Option<i64>,
        name: String,
        genre: Option<String>,
        roster: Vec<Role>,
        ratings: HashMap<String, i32>,
        description: Option<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            genre,
            roster,
            ratings,
            description,
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

    /// Name of the genre this movie belongs to, if any.
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    /// The roster in insertion order.
    pub fn roles(&self) -> &[Role] {
        &self.roster
    }

    pub(crate) fn ratings(&self) -> &HashMap<String, i32> {
        &self.ratings
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Average of the current ratings, rounded to one decimal place.
    /// A movie nobody has rated yet reports 0.
    pub fn rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }

        let sum: i32 = self.ratings.values().sum();
        let average = f64::from(sum) / self.ratings.len() as f64;
        (average * 10.0).round() / 10.0
    }

    /// Validates that the name is between 1 and 255 bytes.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();

        if !validate_length(&name, 1, NAME_MAX) {
            return Err(DomainError::validation("Movie name invalid"));
        }

        self.name = name;
        Ok(())
    }

    /// Sets the genre of this movie. Unconditional replace, last write wins.
    pub fn set_genre(&mut self, genre: &Genre) {
        self.genre = Some(genre.name().to_string());
    }

    /// Attempts to add the actor to this movie under the given character.
    pub fn add_actor(
        &mut self,
        character: impl Into<String>,
        actor: &Actor,
    ) -> Result<(), DomainError> {
        let character = character.into();

        let duplicate = self
            .roster
            .iter()
            .any(|role| role.actor.name() == actor.name() && role.character == character);

        if duplicate {
            return Err(DomainError::validation("Actor already within movie"));
        }

        self.roster.push(Role::new(character, actor.clone()));
        Ok(())
    }

    /// Attempts to remove the actor from this movie.
    ///
    /// Every role the actor plays is removed, not just one.
    pub fn remove_actor(&mut self, actor: &Actor) -> Result<(), DomainError> {
        let before = self.roster.len();
        self.roster.retain(|role| role.actor.name() != actor.name());

        if self.roster.len() == before {
            return Err(DomainError::validation("Actor not within movie"));
        }

        Ok(())
    }

    /// Records the rating given by a user. A user's earlier rating is
    /// overwritten, not averaged.
    pub fn add_rating(&mut self, user: impl Into<String>, rating: i32) -> Result<(), DomainError> {
        if !(0..=5).contains(&rating) {
            return Err(DomainError::validation(
                "Rating must be integer between 0 and 5 (inclusive)",
            ));
        }

        self.ratings.insert(user.into(), rating);
        Ok(())
    }

    /// Provides 3000 bytes for description.
    pub fn set_description(&mut self, description: Option<String>) -> Result<(), DomainError> {
        if let Some(ref value) = description {
            if !validate_length(value, 0, DESCRIPTION_MAX) {
                return Err(DomainError::validation("Movie description too long"));
            }
        }

        self.description = description;
        Ok(())
    }

    /// Allows up to ~500kB of encoded image data.
    pub fn set_image(&mut self, image: Option<String>) -> Result<(), DomainError> {
        if let Some(ref value) = image {
            if !validate_length(value, 0, IMAGE_MAX) {
                return Err(DomainError::validation("Movie image too large"));
            }
        }

        self.image = image;
        Ok(())
    }
}
