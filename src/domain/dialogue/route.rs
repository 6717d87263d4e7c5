//! Decides which path a user utterance takes.

use std::sync::Arc;

use crate::domain::scenario::{ScenarioEntry, ScenarioTable};

/// Outcome of routing one utterance. First match wins, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// The escalation trigger, while escalation is enabled.
    Escalate,
    /// An exact scenario key.
    Scripted(&'a ScenarioEntry),
    /// Anything else goes to the conversational assistant.
    Fallback,
}

/// Pure routing over the scenario table. Every input routes somewhere;
/// there is no "unrecognised" outcome.
#[derive(Debug, Clone)]
pub struct DialogueRouter {
    table: Arc<ScenarioTable>,
    escalation_enabled: bool,
}

impl DialogueRouter {
    pub fn new(table: Arc<ScenarioTable>, escalation_enabled: bool) -> Self {
        Self {
            table,
            escalation_enabled,
        }
    }

    pub fn route(&self, utterance: &str) -> Route<'_> {
        if self.escalation_enabled && utterance == self.table.escalation().trigger_label {
            return Route::Escalate;
        }
        match self.table.lookup(utterance) {
            Some(entry) => Route::Scripted(entry),
            None => Route::Fallback,
        }
    }

    pub fn table(&self) -> &ScenarioTable {
        &self.table
    }
}
