//! Character-by-character reveal of a conversational reply.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::WidgetError;
use crate::domain::foundation::MessageId;
use crate::domain::transcript::Message;
use crate::ports::ChatReply;

/// Where revealed text goes.
///
/// `extend` must only ever touch the message `open` returned.
#[async_trait]
pub trait RevealSink: Send + Sync {
    /// Appends the placeholder and returns its id.
    async fn open(&self, placeholder: Message) -> Result<MessageId, WidgetError>;

    /// Appends one character to the opened message.
    async fn extend(&self, id: MessageId, delta: char) -> Result<(), WidgetError>;

    /// Marks the reveal complete.
    async fn finish(&self, id: MessageId);
}

/// How a reveal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Completed { id: MessageId, chars: usize },
    /// The widget was torn down between two characters.
    Cancelled { id: MessageId, revealed: usize },
}

/// Reveals replies one character per interval.
#[derive(Debug, Clone, Copy)]
pub struct StreamRenderer {
    interval: Duration,
}

impl StreamRenderer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Appends an empty assistant message carrying the reply's options and
    /// related questions, then grows its content in order.
    pub async fn reveal<S>(
        &self,
        sink: &S,
        reply: ChatReply,
        cancel: &CancellationToken,
    ) -> Result<RevealOutcome, WidgetError>
    where
        S: RevealSink + ?Sized,
    {
        let placeholder = Message::assistant(String::new())
            .with_options(reply.options)
            .with_related_questions(reply.related_questions);
        let id = sink.open(placeholder).await?;

        let mut revealed = 0;
        for ch in reply.content.chars() {
            if cancel.is_cancelled() {
                return Ok(RevealOutcome::Cancelled { id, revealed });
            }
            sink.extend(id, ch).await?;
            revealed += 1;

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(revealed, "Reveal cancelled");
                    return Ok(RevealOutcome::Cancelled { id, revealed });
                }
                _ = sleep(self.interval) => {}
            }
        }

        sink.finish(id).await;
        Ok(RevealOutcome::Completed { id, chars: revealed })
    }
}

impl Default for StreamRenderer {
    fn default() -> Self {
        Self::new(Duration::from_millis(30))
    }
}
