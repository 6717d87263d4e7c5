//! `POST /api/chat` adapter.

use async_trait::async_trait;

use super::ApiClient;
use crate::ports::{ApiError, ChatCompletion, ChatReply, ChatRequest};

/// Chat completion backed by the support backend.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    api: ApiClient,
}

impl HttpChatClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ChatCompletion for HttpChatClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ApiError> {
        tracing::debug!(messages = request.messages.len(), "Requesting chat completion");
        self.api.post_json("chat", &request).await
    }
}
