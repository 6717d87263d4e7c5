//! Lifecycle of the post-chat evaluation modal.

use serde::Serialize;

use crate::domain::foundation::StateMachine;

/// Modal visibility and phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Closed,
    /// The form is shown and editable.
    Form,
    /// The thank-you message is shown until auto-close.
    Submitted,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl StateMachine for ModalState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ModalState::*;
        matches!(
            (self, target),
            (Closed, Form) | (Form, Submitted) | (Form, Closed) | (Submitted, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ModalState::*;
        match self {
            Closed => vec![Form],
            Form => vec![Submitted, Closed],
            Submitted => vec![Closed],
        }
    }
}
