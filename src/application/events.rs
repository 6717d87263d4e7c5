//! Change notifications published by a widget.

use crate::domain::foundation::MessageId;
use crate::domain::transcript::Message;

/// What changed in a widget. Front ends render from these.
///
/// Options and related questions arrive with `MessageAppended`, but for a
/// streamed reply a front end should only show them after the matching
/// `StreamCompleted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    MessageAppended { index: usize, message: Message },
    MessageExtended { index: usize, id: MessageId, delta: char },
    StreamCompleted { index: usize, id: MessageId },
    LoadingChanged { loading: bool },
    EscalationStarted { remaining_seconds: u32, queue_position: u32 },
    EscalationTick { remaining_seconds: u32 },
    EscalationConnected,
    AttachmentsChanged { pending: usize },
}
