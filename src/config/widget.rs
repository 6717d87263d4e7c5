//! Widget presentation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::dialogue::InteractionMode;

/// Title shown when none is configured
pub const DEFAULT_TITLE: &str = "チャットボットで質問する";

/// Widget presentation configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Header title
    #[serde(default = "default_title")]
    pub title: String,

    /// Greeting override; the scenario greeting is used when absent
    pub initial_message: Option<String>,

    /// Greeting options override; the root menu is used when absent
    pub initial_options: Option<Vec<String>>,

    /// How the user may interact
    #[serde(default)]
    pub mode: InteractionMode,

    /// Entry channel reported at session creation (e.g. "web", "line")
    #[serde(default = "default_source")]
    pub source: String,
}

impl WidgetConfig {
    /// Validate widget configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.source.trim().is_empty() {
            return Err(ValidationError::MissingRequired("widget.source"));
        }
        Ok(())
    }

    /// True when the user arrived from the LINE channel
    pub fn is_line(&self) -> bool {
        self.source.eq_ignore_ascii_case("line")
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            initial_message: None,
            initial_options: None,
            mode: InteractionMode::default(),
            source: default_source(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_source() -> String {
    "web".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.mode, InteractionMode::Hybrid);
        assert_eq!(config.source, "web");
        assert!(config.initial_options.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let config = WidgetConfig {
            title: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_line_source_detection() {
        let config = WidgetConfig {
            source: "LINE".to_string(),
            ..Default::default()
        };
        assert!(config.is_line());
        assert!(!WidgetConfig::default().is_line());
    }
}
