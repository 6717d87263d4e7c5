//! Escalation domain module.
//!
//! Tracks the simulated countdown until a human agent is "connected".

mod state;

pub use state::{EscalationError, EscalationPhase, EscalationState, TickOutcome};
