//! Chat Completion Port - the conversational assistant behind the fallback path.
//!
//! Unmatched utterances are sent here with the whole transcript so far. The
//! reply is revealed character by character by the stream renderer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::domain::transcript::{Role, TranscriptStore};

/// Port for the conversational assistant.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Produces one reply for the conversation so far.
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ApiError>;
}

/// One `{role, content}` pair of the request history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: Role,
    pub content: String,
}

impl ApiMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ApiMessage>,
}

impl ChatRequest {
    /// Projects the whole transcript, including the latest user turn.
    pub fn from_transcript(transcript: &TranscriptStore) -> Self {
        Self {
            messages: transcript
                .api_messages()
                .map(|(role, content)| ApiMessage::new(role, content))
                .collect(),
        }
    }

    /// Content of the newest user message, if any.
    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Assistant reply. Missing lists deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub related_questions: Vec<String>,
}

impl ChatReply {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn with_related_questions(mut self, questions: Vec<String>) -> Self {
        self.related_questions = questions;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transcript::Message;

    #[test]
    fn request_mirrors_transcript() {
        let mut transcript = TranscriptStore::new();
        transcript.append(Message::assistant("こんにちは"));
        transcript.append(Message::user("金利は？", Vec::new()));

        let request = ChatRequest::from_transcript(&transcript);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "assistant");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "金利は？");
        assert_eq!(request.last_user_text(), Some("金利は？"));
    }

    #[test]
    fn reply_lists_default_to_empty() {
        let reply: ChatReply = serde_json::from_str(r#"{"content":"回答です"}"#).unwrap();
        assert_eq!(reply.content, "回答です");
        assert!(reply.options.is_empty());
        assert!(reply.related_questions.is_empty());
    }

    #[test]
    fn reply_reads_all_fields() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"content":"c","options":["a"],"related_questions":["q1","q2"]}"#,
        )
        .unwrap();
        assert_eq!(reply.options, vec!["a"]);
        assert_eq!(reply.related_questions.len(), 2);
    }
}
