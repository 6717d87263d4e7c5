//! Domain layer containing the widget's business rules and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, rating, state machine, errors)
//! - `scenario` - Menu decision tree and canned escalation/apology texts
//! - `dialogue` - Utterance routing, dialogue state machine, interaction modes
//! - `transcript` - Append-only message log and its text export
//! - `escalation` - Countdown to the simulated human hand-off
//! - `attachment` - File policy, blob registry, pending tray
//! - `evaluation` - Post-chat feedback form and modal lifecycle
//! - `survey` - Pre-chat questionnaire

pub mod attachment;
pub mod dialogue;
pub mod escalation;
pub mod evaluation;
pub mod foundation;
pub mod scenario;
pub mod survey;
pub mod transcript;
