//! Scenario domain module.
//!
//! The static menu decision tree used by selection mode, plus the canned
//! texts for escalation and the fallback apology.

mod entry;
mod table;

pub use entry::{EscalationScript, ScenarioEntry};
pub use table::{ScenarioError, ScenarioTable, BUILTIN_SCENARIO, SUPPORTED_VERSION};
