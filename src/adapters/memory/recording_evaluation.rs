//! Evaluation submitter double that keeps what it receives.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::evaluation::EvaluationRecord;
use crate::ports::{ApiError, EvaluationSubmitter};

/// Records every submission; optionally fails each one after recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingEvaluationSubmitter {
    records: Arc<Mutex<Vec<EvaluationRecord>>>,
    failure: Option<ApiError>,
}

impl RecordingEvaluationSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<EvaluationRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EvaluationSubmitter for RecordingEvaluationSubmitter {
    async fn submit(&self, record: EvaluationRecord) -> Result<(), ApiError> {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
