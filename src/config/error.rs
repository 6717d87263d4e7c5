//! Configuration error types

use thiserror::Error;

use crate::domain::scenario::ScenarioError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Scenario loading failed: {0}")]
    Scenario(#[from] ScenarioError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Escalation countdown must be at least one second")]
    InvalidCountdown,

    #[error("Invalid timing value for {0}")]
    InvalidInterval(&'static str),

    #[error("Widget title cannot be empty")]
    EmptyTitle,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
