//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and the
//! validation error that form the vocabulary of the widget domain.

mod errors;
mod ids;
mod rating;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{BlobId, MessageId, SessionId};
pub use rating::Rating;
pub use state_machine::StateMachine;
pub use timestamp::{Timestamp, EXPORT_LABEL_FORMAT, FILE_STAMP_FORMAT, TIME_LABEL_FORMAT};
