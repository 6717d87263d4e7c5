//! Errors surfaced to front ends by widget operations.

use thiserror::Error;

use crate::domain::attachment::AttachmentError;
use crate::domain::escalation::EscalationError;
use crate::domain::foundation::ValidationError;
use crate::domain::transcript::TranscriptError;

/// Guard failures and invalid requests. Remote failures never appear here;
/// they are absorbed where the call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("Nothing to send")]
    EmptyInput,

    #[error("A reply is still being composed")]
    Busy,

    #[error("Free-text input is disabled in this mode")]
    InputDisabled,

    #[error("'{0}' is not one of the offered choices")]
    UnknownOption(String),

    #[error("An operator hand-off is already in progress")]
    AlreadyEscalating,

    #[error("The {0} feature is disabled")]
    FeatureDisabled(&'static str),

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error(transparent)]
    Escalation(#[from] EscalationError),

    #[error("Invalid state: {0}")]
    InvalidState(#[from] ValidationError),

    #[error("Widget has been shut down")]
    ShutDown,
}
