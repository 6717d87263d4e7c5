//! Offline evaluation sink.

use async_trait::async_trait;

use crate::domain::evaluation::EvaluationRecord;
use crate::ports::{ApiError, EvaluationSubmitter};

/// Writes evaluations to the log instead of a server.
#[derive(Debug, Clone, Default)]
pub struct LoggingEvaluationSubmitter;

impl LoggingEvaluationSubmitter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EvaluationSubmitter for LoggingEvaluationSubmitter {
    async fn submit(&self, record: EvaluationRecord) -> Result<(), ApiError> {
        tracing::info!(
            session_id = %record.session_id,
            is_helpful = ?record.is_helpful,
            rating = ?record.rating.map(|r| r.value()),
            feedback_chars = record.feedback_text.chars().count(),
            "Evaluation recorded"
        );
        Ok(())
    }
}
