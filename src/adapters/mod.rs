//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the widget to external systems:
//! - `http` - Support backend over HTTP (reqwest)
//! - `demo` - Offline responder, session issuer and evaluation log
//! - `memory` - Scripted and recording doubles for tests

pub mod demo;
pub mod http;
pub mod memory;

pub use demo::{DemoResponder, LocalSessionService, LoggingEvaluationSubmitter};
pub use http::{ApiClient, HttpChatClient, HttpEvaluationClient, HttpSessionClient};
pub use memory::{RecordingEvaluationSubmitter, ScriptedChatCompletion, StaticSessionService};
