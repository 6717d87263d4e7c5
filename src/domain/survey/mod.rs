//! Survey domain module.
//!
//! The pre-chat questionnaire shown before the widget opens.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories offered when none are configured.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "【フラット35】融資について",
    "【フラット35】返済について",
    "【リ・バース60】について",
    "その他のご質問",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    #[error("A question category must be selected")]
    MissingCategory,

    #[error("Unknown question category '{0}'")]
    UnknownCategory(String),
}

/// The questionnaire: a required category and an optional name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyForm {
    categories: Vec<String>,
}

impl SurveyForm {
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Validates the answers. A blank name is treated as absent.
    pub fn complete(
        &self,
        category: Option<&str>,
        name: Option<&str>,
    ) -> Result<SurveyResponse, SurveyError> {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(SurveyError::MissingCategory)?;
        if !self.categories.iter().any(|c| c == category) {
            return Err(SurveyError::UnknownCategory(category.to_string()));
        }
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Ok(SurveyResponse {
            category: category.to_string(),
            name,
        })
    }
}

impl Default for SurveyForm {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }
}

/// A completed survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub category: String,
    pub name: Option<String>,
}

impl SurveyResponse {
    /// Opening message of a chat that follows this survey.
    pub fn greeting(&self) -> String {
        let salutation = match &self.name {
            Some(name) => format!("{name}様、お問い合わせありがとうございます。"),
            None => "お問い合わせありがとうございます。".to_string(),
        };
        format!(
            "{salutation}\n「{}」についてのご質問ですね。\nお知りになりたい内容を入力してください。",
            self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_four_categories() {
        assert_eq!(SurveyForm::default().categories().len(), 4);
    }

    #[test]
    fn category_is_required() {
        let form = SurveyForm::default();
        assert_eq!(form.complete(None, Some("山田")), Err(SurveyError::MissingCategory));
        assert_eq!(form.complete(Some("  "), None), Err(SurveyError::MissingCategory));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let form = SurveyForm::default();
        assert_eq!(
            form.complete(Some("保険について"), None),
            Err(SurveyError::UnknownCategory("保険について".into()))
        );
    }

    #[test]
    fn name_is_optional() {
        let form = SurveyForm::default();
        let response = form.complete(Some("その他のご質問"), Some("   ")).unwrap();
        assert_eq!(response.name, None);
    }

    #[test]
    fn name_is_trimmed() {
        let form = SurveyForm::default();
        let response = form
            .complete(Some("【リ・バース60】について"), Some(" 佐藤 "))
            .unwrap();
        assert_eq!(response.category, "【リ・バース60】について");
        assert_eq!(response.name.as_deref(), Some("佐藤"));
    }

    mod greeting {
        use super::*;

        #[test]
        fn names_the_user_and_the_category() {
            let response = SurveyResponse {
                category: "その他のご質問".into(),
                name: Some("山田".into()),
            };
            assert_eq!(
                response.greeting(),
                "山田様、お問い合わせありがとうございます。\n「その他のご質問」についてのご質問ですね。\nお知りになりたい内容を入力してください。"
            );
        }

        #[test]
        fn omits_the_name_when_absent() {
            let response = SurveyResponse {
                category: "【フラット35】返済について".into(),
                name: None,
            };
            let greeting = response.greeting();
            assert!(greeting.starts_with("お問い合わせありがとうございます。\n"));
            assert!(greeting.contains("「【フラット35】返済について」"));
        }
    }
}
