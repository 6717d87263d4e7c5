//! Offline adapters used when `api.responder = mock`.

mod demo_responder;
mod local_session;
mod logging_evaluation;

pub use demo_responder::{DemoResponder, DEMO_OPTIONS, DEMO_RELATED_QUESTIONS};
pub use local_session::LocalSessionService;
pub use logging_evaluation::LoggingEvaluationSubmitter;
