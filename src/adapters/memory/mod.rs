//! In-memory port implementations for tests and embedding.

mod recording_evaluation;
mod scripted_chat;
mod static_session;

pub use recording_evaluation::RecordingEvaluationSubmitter;
pub use scripted_chat::ScriptedChatCompletion;
pub use static_session::StaticSessionService;
