//! Evaluation form contents and the record sent to the backend.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Rating, SessionId, ValidationError};

/// Maximum accepted feedback length, in characters.
pub const MAX_FEEDBACK_CHARS: usize = 2000;

/// What the user filled in. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationForm {
    pub is_helpful: Option<bool>,
    pub rating: Option<Rating>,
    pub feedback_text: String,
}

impl EvaluationForm {
    /// Builds a form from raw widget inputs. A picker value of 0 means
    /// "no rating".
    pub fn from_inputs(
        is_helpful: Option<bool>,
        rating_picker: u8,
        feedback_text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let feedback_text = feedback_text.into();
        let chars = feedback_text.chars().count();
        if chars > MAX_FEEDBACK_CHARS {
            return Err(ValidationError::out_of_range(
                "feedback_text",
                0,
                MAX_FEEDBACK_CHARS as i32,
                chars as i32,
            ));
        }
        Ok(Self {
            is_helpful,
            rating: Rating::from_picker(rating_picker)?,
            feedback_text,
        })
    }

    /// True if the user gave no answer at all.
    pub fn is_blank(&self) -> bool {
        self.is_helpful.is_none() && self.rating.is_none() && self.feedback_text.trim().is_empty()
    }

    pub fn into_record(self, session_id: SessionId) -> EvaluationRecord {
        EvaluationRecord {
            session_id,
            is_helpful: self.is_helpful,
            rating: self.rating,
            feedback_text: self.feedback_text,
        }
    }
}

/// Wire body of `POST /api/evaluations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub session_id: SessionId,
    pub is_helpful: Option<bool>,
    pub rating: Option<Rating>,
    pub feedback_text: String,
}
