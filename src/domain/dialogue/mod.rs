//! Dialogue domain module.
//!
//! Routing of user utterances (scripted, escalation, fallback), the
//! per-widget dialogue state machine, and interaction modes.

mod mode;
mod route;
mod state;

pub use mode::InteractionMode;
pub use route::{DialogueRouter, Route};
pub use state::DialogueState;
