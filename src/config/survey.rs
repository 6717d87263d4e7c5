//! Pre-chat survey configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::survey::SurveyForm;

/// Questions asked before the chat opens
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SurveyConfig {
    /// Question categories offered to the user, in display order
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl SurveyConfig {
    /// Validate survey configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.categories.iter().all(|c| c.trim().is_empty()) {
            return Err(ValidationError::MissingRequired("survey.categories"));
        }
        Ok(())
    }

    /// The questionnaire over the configured categories.
    pub fn form(&self) -> SurveyForm {
        SurveyForm::new(self.categories.clone())
    }
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

fn default_categories() -> Vec<String> {
    SurveyForm::default().categories().to_vec()
}
