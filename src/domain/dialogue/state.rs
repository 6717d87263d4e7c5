//! Per-widget dialogue state machine.
//!
//! Only one assistant reply is composed at a time. A dispatch is accepted
//! only in `Idle`; everything else is "loading".

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where the widget is in composing the current assistant reply.
///
/// - `Idle`: ready for input
/// - `AwaitingReply`: waiting out the scripted delay or the remote call
/// - `Streaming`: revealing a fallback reply character by character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Idle,
    AwaitingReply,
    Streaming,
}

impl DialogueState {
    /// Returns true if a new dispatch may start.
    pub fn accepts_dispatch(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The `loading` flag front ends use to disable send and menu buttons.
    pub fn is_loading(&self) -> bool {
        !self.accepts_dispatch()
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueState::*;
        matches!(
            (self, target),
            // User sent something
            (Idle, AwaitingReply) |
            // Fallback reply arrived and starts revealing
            (AwaitingReply, Streaming) |
            // Scripted reply or apology appended
            (AwaitingReply, Idle) |
            // Reveal finished
            (Streaming, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        match self {
            Idle => vec![AwaitingReply],
            AwaitingReply => vec![Streaming, Idle],
            Streaming => vec![Idle],
        }
    }
}
