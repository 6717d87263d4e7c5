//! Scenario source configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::scenario::{ScenarioError, ScenarioTable};

/// Where the menu decision tree comes from
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ScenarioConfig {
    /// YAML document replacing the built-in scenario
    pub path: Option<PathBuf>,
}

impl ScenarioConfig {
    /// Loads the configured document, or the built-in one.
    pub fn load_table(&self) -> Result<Arc<ScenarioTable>, ScenarioError> {
        match &self.path {
            Some(path) => ScenarioTable::load(path).map(Arc::new),
            None => ScenarioTable::builtin(),
        }
    }
}
