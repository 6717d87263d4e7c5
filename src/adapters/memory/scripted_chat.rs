//! Scripted chat completion for tests.
//!
//! Replies are consumed in order; once the queue is empty every call fails
//! with `ApiError::Unavailable`. Requests are recorded for verification.
//!
//! ```ignore
//! let chat = ScriptedChatCompletion::new()
//!     .with_reply(ChatReply::new("回答です"))
//!     .with_error(ApiError::status(500, "boom"))
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ApiError, ChatCompletion, ChatReply, ChatRequest};

/// Queue-driven chat completion double.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChatCompletion {
    replies: Arc<Mutex<VecDeque<Result<ChatReply, ApiError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedChatCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, reply: ChatReply) -> Self {
        self.push(Ok(reply));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: ApiError) -> Self {
        self.push(Err(error));
        self
    }

    /// Simulated latency before each answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    fn push(&self, entry: Result<ChatReply, ApiError>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(entry);
        }
    }
}

#[async_trait]
impl ChatCompletion for ScriptedChatCompletion {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        let next = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        next.unwrap_or_else(|| Err(ApiError::unavailable("no scripted reply left")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_order_then_fails() {
        let chat = ScriptedChatCompletion::new()
            .with_reply(ChatReply::new("一"))
            .with_error(ApiError::status(500, "boom"));
        let request = ChatRequest { messages: Vec::new() };

        assert_eq!(chat.complete(request.clone()).await.unwrap().content, "一");
        assert!(matches!(
            chat.complete(request.clone()).await,
            Err(ApiError::Status { status: 500, .. })
        ));
        assert!(matches!(
            chat.complete(request).await,
            Err(ApiError::Unavailable(_))
        ));
        assert_eq!(chat.call_count(), 3);
    }
}
