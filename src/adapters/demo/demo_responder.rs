//! Offline chat responder.
//!
//! Stands in for the support backend when no server is configured. Waits a
//! fixed latency, then echoes the user's text inside a notice explaining
//! that the reply is a sample.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ApiError, ChatCompletion, ChatReply, ChatRequest};

const DEMO_TEMPLATE: &str = "【デモモード】\n\nご質問ありがとうございます。「{text}」に関する回答です。\n\n※現在はサーバーに接続されていないため、これは自動応答のサンプルです。\n実際のシステムでは、RAG（検索拡張生成）を用いて詳細な回答を生成します。";

pub const DEMO_OPTIONS: &[&str] = &["デモ質問1", "デモ質問2", "最初のメニューに戻る"];
pub const DEMO_RELATED_QUESTIONS: &[&str] = &["リ・バース60とは？", "金利について"];

/// Demo chat responder.
#[derive(Debug, Clone)]
pub struct DemoResponder {
    latency: Duration,
}

impl DemoResponder {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// The reply produced for a given user text.
    pub fn reply_for(text: &str) -> ChatReply {
        ChatReply::new(DEMO_TEMPLATE.replace("{text}", text))
            .with_options(DEMO_OPTIONS.iter().map(|s| s.to_string()).collect())
            .with_related_questions(DEMO_RELATED_QUESTIONS.iter().map(|s| s.to_string()).collect())
    }
}

impl Default for DemoResponder {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl ChatCompletion for DemoResponder {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ApiError> {
        sleep(self.latency).await;
        let text = request.last_user_text().unwrap_or_default();
        tracing::debug!(chars = text.chars().count(), "Demo responder answering");
        Ok(Self::reply_for(text))
    }
}
