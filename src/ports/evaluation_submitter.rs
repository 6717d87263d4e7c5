//! Evaluation Submitter Port - delivers post-chat feedback.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::evaluation::EvaluationRecord;

/// Port for recording an evaluation. Called fire-and-forget; the result is
/// only logged.
#[async_trait]
pub trait EvaluationSubmitter: Send + Sync {
    async fn submit(&self, record: EvaluationRecord) -> Result<(), ApiError>;
}
