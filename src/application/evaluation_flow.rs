//! Post-chat evaluation modal.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::WidgetError;
use crate::domain::evaluation::{EvaluationForm, ModalState};
use crate::domain::foundation::{SessionId, StateMachine};
use crate::ports::EvaluationSubmitter;

/// Drives the evaluation modal: `Form -> Submitted -> Closed` after a short
/// thank-you, or `Form -> Closed` on skip.
///
/// Submission is fire-and-forget. Without a session nothing is sent, and
/// delivery failures are only logged.
pub struct EvaluationFlow {
    session_id: Option<SessionId>,
    submitter: Arc<dyn EvaluationSubmitter>,
    close_after: Duration,
    state: ModalState,
}

impl EvaluationFlow {
    pub fn new(
        session_id: Option<SessionId>,
        submitter: Arc<dyn EvaluationSubmitter>,
        close_after: Duration,
    ) -> Self {
        Self {
            session_id,
            submitter,
            close_after,
            state: ModalState::Closed,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Shows the form.
    pub fn open(&mut self) -> Result<(), WidgetError> {
        self.state = self.state.transition_to(ModalState::Form)?;
        Ok(())
    }

    /// Sends the form in the background, shows the thank-you for the
    /// configured window, then closes. Never reports delivery failures.
    pub async fn submit(&mut self, form: EvaluationForm) -> Result<(), WidgetError> {
        self.state = self.state.transition_to(ModalState::Submitted)?;

        match &self.session_id {
            Some(session_id) => {
                let record = form.into_record(session_id.clone());
                let submitter = Arc::clone(&self.submitter);
                tokio::spawn(async move {
                    if let Err(error) = submitter.submit(record).await {
                        tracing::warn!(error = %error, "Evaluation submission failed");
                    }
                });
            }
            None => tracing::debug!("No session; evaluation not sent"),
        }

        sleep(self.close_after).await;
        self.state = self.state.transition_to(ModalState::Closed)?;
        Ok(())
    }

    /// Discards the form without sending anything.
    pub fn skip(&mut self) -> Result<(), WidgetError> {
        self.state = self.state.transition_to(ModalState::Closed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::RecordingEvaluationSubmitter;
    use crate::ports::ApiError;
    use tokio::time::Instant;

    fn flow(
        session: Option<&str>,
        submitter: &RecordingEvaluationSubmitter,
    ) -> EvaluationFlow {
        EvaluationFlow::new(
            session.map(|s| SessionId::new(s).unwrap()),
            Arc::new(submitter.clone()),
            Duration::from_millis(1500),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn submit_sends_literal_values_once_and_closes() {
        let submitter = RecordingEvaluationSubmitter::new();
        let mut flow = flow(Some("sess-42"), &submitter);
        flow.open().unwrap();

        let started = Instant::now();
        let form = EvaluationForm::from_inputs(Some(true), 5, "good").unwrap();
        flow.submit(form).await.unwrap();

        assert_eq!(flow.state(), ModalState::Closed);
        assert!(started.elapsed() >= Duration::from_millis(1500));
        let records = submitter.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].session_id.as_str(), "sess-42");
        assert_eq!(records[0].is_helpful, Some(true));
        assert_eq!(records[0].rating.map(|r| r.value()), Some(5));
        assert_eq!(records[0].feedback_text, "good");
    }

    #[tokio::test(start_paused = true)]
    async fn without_session_nothing_is_sent() {
        let submitter = RecordingEvaluationSubmitter::new();
        let mut flow = flow(None, &submitter);
        flow.open().unwrap();
        flow.submit(EvaluationForm::default()).await.unwrap();

        assert_eq!(flow.state(), ModalState::Closed);
        assert!(submitter.records().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn delivery_failure_still_closes() {
        let submitter = RecordingEvaluationSubmitter::failing(ApiError::network("refused"));
        let mut flow = flow(Some("sess-1"), &submitter);
        flow.open().unwrap();

        assert!(flow.submit(EvaluationForm::default()).await.is_ok());
        assert_eq!(flow.state(), ModalState::Closed);
        assert_eq!(submitter.records().len(), 1);
    }

    #[tokio::test]
    async fn skip_closes_without_sending() {
        let submitter = RecordingEvaluationSubmitter::new();
        let mut flow = flow(Some("sess-1"), &submitter);
        flow.open().unwrap();
        flow.skip().unwrap();

        assert_eq!(flow.state(), ModalState::Closed);
        assert!(submitter.records().is_empty());
    }

    #[tokio::test]
    async fn submit_requires_an_open_form() {
        let submitter = RecordingEvaluationSubmitter::new();
        let mut flow = flow(Some("sess-1"), &submitter);
        let result = flow.submit(EvaluationForm::default()).await;
        assert!(matches!(result, Err(WidgetError::InvalidState(_))));
        assert!(submitter.records().is_empty());
    }
}
