//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Sources are layered: built-in defaults, an optional
//! TOML file, then environment variables with the `SUPPORT_CHAT` prefix and
//! `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use support_chat::config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Widget title: {}", config.widget.title);
//! ```

mod api;
mod error;
mod features;
mod logging;
mod pane;
mod scenario;
mod survey;
mod timing;
mod widget;

pub use api::{ApiConfig, Responder};
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::LoggingConfig;
pub use pane::{
    Pane, CONVERSATION_GREETING, CONVERSATION_TITLE, LINE_GREETING, SELECTION_GREETING,
    SELECTION_TITLE, STANDALONE_TITLE,
};
pub use scenario::ScenarioConfig;
pub use survey::SurveyConfig;
pub use timing::TimingConfig;
pub use widget::{WidgetConfig, DEFAULT_TITLE};

use serde::Deserialize;
use std::path::Path;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SUPPORT_CHAT";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// hybrid widget backed by the demo responder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Title, greeting, mode, entry channel
    #[serde(default)]
    pub widget: WidgetConfig,

    /// Optional affordances
    #[serde(default)]
    pub features: FeatureFlags,

    /// Support backend endpoints and responder choice
    #[serde(default)]
    pub api: ApiConfig,

    /// Delays and intervals
    #[serde(default)]
    pub timing: TimingConfig,

    /// Menu decision tree source
    #[serde(default)]
    pub scenario: ScenarioConfig,

    /// Pre-chat questionnaire
    #[serde(default)]
    pub survey: SurveyConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `file` if given (TOML, or any format `config` recognises by extension)
    /// 3. Reads environment variables with `SUPPORT_CHAT` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `SUPPORT_CHAT__API__RESPONDER=remote` -> `api.responder = remote`
    /// - `SUPPORT_CHAT__FEATURES__ENABLE_DOWNLOAD=false` -> `features.enable_download = false`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or values cannot be
    /// parsed into expected types.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.widget.validate()?;
        self.api.validate()?;
        self.timing.validate()?;
        self.survey.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
