//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the widget and the support backend. Adapters implement these ports.
//!
//! - `SessionService` - Session creation at mount time
//! - `ChatCompletion` - Conversational assistant for unmatched input
//! - `EvaluationSubmitter` - Post-chat feedback delivery

mod api_error;
mod chat_completion;
mod evaluation_submitter;
mod session_service;

pub use api_error::ApiError;
pub use chat_completion::{ApiMessage, ChatCompletion, ChatReply, ChatRequest};
pub use evaluation_submitter::EvaluationSubmitter;
pub use session_service::SessionService;
