//! Logging configuration

use serde::Deserialize;

use super::error::ValidationError;

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Validate logging configuration
    ///
    /// Only a bare level is checked; full `EnvFilter` directives such as
    /// `support_chat=debug` are accepted as-is.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let level = self.level.trim();
        if level.is_empty() {
            return Err(ValidationError::InvalidLogLevel(self.level.clone()));
        }
        if !level.contains('=') && !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(ValidationError::InvalidLogLevel(self.level.clone()));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_directive_accepted() {
        let config = LoggingConfig {
            level: "support_chat=debug,reqwest=warn".to_string(),
            json: false,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_level_rejected() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            json: false,
        };
        assert!(config.validate().is_err());
    }
}
