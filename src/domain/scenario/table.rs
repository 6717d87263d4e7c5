//! The menu decision tree, loaded from a versioned YAML document.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::{EscalationScript, ScenarioEntry};

/// Document versions this build understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// Scenario shipped with the binary.
pub const BUILTIN_SCENARIO: &str = include_str!("../../../scenarios/default.yaml");

static BUILTIN: Lazy<Result<Arc<ScenarioTable>, ScenarioError>> =
    Lazy::new(|| ScenarioTable::from_yaml(BUILTIN_SCENARIO).map(Arc::new));

/// Errors raised while loading a scenario document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("Cannot read scenario file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed scenario document: {0}")]
    Parse(String),

    #[error("Unsupported scenario version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Root menu has no options")]
    EmptyRoot,

    #[error("No entry for the return label '{0}'")]
    MissingReturnEntry(String),

    #[error("Entry '{0}' has empty content")]
    EmptyContent(String),
}

#[derive(Debug, Deserialize)]
struct ScenarioDocument {
    version: u32,
    root: RootNode,
    return_label: String,
    escalation: EscalationScript,
    fallback: FallbackScript,
    #[serde(default)]
    entries: HashMap<String, ScenarioEntry>,
}

#[derive(Debug, Deserialize)]
struct RootNode {
    greeting: String,
    options: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FallbackScript {
    apology: String,
}

/// Immutable label → reply mapping shared read-only by every widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioTable {
    version: u32,
    greeting: String,
    root_options: Vec<String>,
    return_label: String,
    escalation: EscalationScript,
    apology: String,
    entries: HashMap<String, ScenarioEntry>,
}

impl ScenarioTable {
    /// Parses and validates a scenario document.
    ///
    /// The return-to-menu entry always resolves to the root options,
    /// whatever options the document lists for it.
    pub fn from_yaml(source: &str) -> Result<Self, ScenarioError> {
        let doc: ScenarioDocument =
            serde_yaml::from_str(source).map_err(|e| ScenarioError::Parse(e.to_string()))?;

        if doc.version != SUPPORTED_VERSION {
            return Err(ScenarioError::UnsupportedVersion {
                found: doc.version,
                expected: SUPPORTED_VERSION,
            });
        }
        if doc.root.options.is_empty() {
            return Err(ScenarioError::EmptyRoot);
        }
        if let Some((label, _)) = doc.entries.iter().find(|(_, e)| e.content.trim().is_empty()) {
            return Err(ScenarioError::EmptyContent(label.clone()));
        }

        let mut entries = doc.entries;
        let back = entries
            .get_mut(&doc.return_label)
            .ok_or_else(|| ScenarioError::MissingReturnEntry(doc.return_label.clone()))?;
        back.options = doc.root.options.clone();

        let table = Self {
            version: doc.version,
            greeting: doc.root.greeting,
            root_options: doc.root.options,
            return_label: doc.return_label,
            escalation: doc.escalation,
            apology: doc.fallback.apology,
            entries,
        };

        let dangling = table.dangling_labels();
        if !dangling.is_empty() {
            tracing::debug!(
                count = dangling.len(),
                "Scenario labels without entries will use the conversational fallback"
            );
        }
        Ok(table)
    }

    /// Reads a scenario document from disk.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let source = std::fs::read_to_string(path).map_err(|e| ScenarioError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&source)
    }

    /// The scenario compiled into the binary, parsed once per process.
    pub fn builtin() -> Result<Arc<Self>, ScenarioError> {
        (*BUILTIN).clone()
    }

    /// Exact-match lookup. No normalisation is applied.
    pub fn lookup(&self, label: &str) -> Option<&ScenarioEntry> {
        self.entries.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn root_options(&self) -> &[String] {
        &self.root_options
    }

    pub fn return_label(&self) -> &str {
        &self.return_label
    }

    pub fn escalation(&self) -> &EscalationScript {
        &self.escalation
    }

    pub fn apology(&self) -> &str {
        &self.apology
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offered labels without an entry, sorted, ignoring the escalation
    /// trigger. Selecting one of these reaches the conversational fallback.
    pub fn dangling_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .root_options
            .iter()
            .chain(self.entries.values().flat_map(|e| e.options.iter()))
            .filter(|label| !self.entries.contains_key(*label))
            .filter(|label| **label != self.escalation.trigger_label)
            .cloned()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        labels.sort();
        labels
    }

    /// Entry labels reachable from the root menu by following options.
    pub fn reachable_labels(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = self.root_options.iter().map(String::as_str).collect();
        while let Some(label) = queue.pop_front() {
            let Some(entry) = self.entries.get(label) else {
                continue;
            };
            if !seen.insert(label) {
                continue;
            }
            queue.extend(entry.options.iter().map(String::as_str));
        }
        let mut labels: Vec<String> = seen.into_iter().map(str::to_string).collect();
        labels.sort();
        labels
    }
}
