//! HTTP adapters for the support backend (`api.responder = remote`).
//!
//! - `POST {base}/api/sessions` - session creation
//! - `POST {base}/api/chat` - conversational fallback
//! - `POST {base}/api/evaluations` - post-chat feedback

mod chat_client;
mod client;
mod evaluation_client;
mod session_client;

pub use chat_client::HttpChatClient;
pub use client::ApiClient;
pub use evaluation_client::HttpEvaluationClient;
pub use session_client::HttpSessionClient;
