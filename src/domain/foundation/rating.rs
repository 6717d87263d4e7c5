//! Rating value object for the post-chat evaluation (1 to 5 stars).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Star rating given in the evaluation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a Rating, returning error if outside 1..=5.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range(
                "rating",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ))
        }
    }

    /// Interprets a raw star-picker value where 0 means "not rated".
    pub fn from_picker(value: u8) -> Result<Option<Self>, ValidationError> {
        if value == 0 {
            Ok(None)
        } else {
            Self::try_from_u8(value).map(Some)
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from_u8(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = self.0 as usize;
        let empty = (Self::MAX - self.0) as usize;
        write!(f, "{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}
