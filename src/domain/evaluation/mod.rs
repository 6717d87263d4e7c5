//! Evaluation domain module.
//!
//! The optional post-chat feedback form and its modal lifecycle.

mod form;
mod modal;

pub use form::{EvaluationForm, EvaluationRecord, MAX_FEEDBACK_CHARS};
pub use modal::ModalState;
