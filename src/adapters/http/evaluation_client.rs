//! `POST /api/evaluations` adapter.

use async_trait::async_trait;

use super::ApiClient;
use crate::domain::evaluation::EvaluationRecord;
use crate::ports::{ApiError, EvaluationSubmitter};

/// Evaluation delivery backed by the support backend.
#[derive(Debug, Clone)]
pub struct HttpEvaluationClient {
    api: ApiClient,
}

impl HttpEvaluationClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EvaluationSubmitter for HttpEvaluationClient {
    async fn submit(&self, record: EvaluationRecord) -> Result<(), ApiError> {
        self.api.post_json_no_content("evaluations", &record).await
    }
}
