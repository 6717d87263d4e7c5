//! The chat widget: one pane's transcript, dialogue and side features.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use super::dispatcher::{DialogueDispatcher, DispatchOutcome, DispatcherSettings};
use super::evaluation_flow::EvaluationFlow;
use super::shared::WidgetCore;
use super::stream_renderer::StreamRenderer;
use super::{WidgetError, WidgetEvent};
use crate::config::{AppConfig, FeatureFlags, WidgetConfig};
use crate::domain::attachment::{Attachment, AttachmentPolicy};
use crate::domain::dialogue::{DialogueRouter, DialogueState, InteractionMode};
use crate::domain::escalation::EscalationState;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::scenario::ScenarioTable;
use crate::domain::survey::SurveyResponse;
use crate::domain::transcript::{Message, TranscriptExporter};
use crate::ports::{ChatCompletion, EvaluationSubmitter, SessionService};

/// External collaborators a widget talks to.
#[derive(Clone)]
pub struct WidgetDeps {
    pub chat: Arc<dyn ChatCompletion>,
    pub sessions: Arc<dyn SessionService>,
    pub evaluations: Arc<dyn EvaluationSubmitter>,
}

/// A mounted chat widget.
///
/// Front ends call the operations below and render from
/// [`subscribe`](Self::subscribe). Share it with `Arc` to dispatch from a
/// spawned task while the front end keeps reading input.
pub struct ChatWidget {
    core: Arc<WidgetCore>,
    dispatcher: DialogueDispatcher,
    config: WidgetConfig,
    features: FeatureFlags,
    policy: AttachmentPolicy,
    session_id: Option<SessionId>,
    evaluations: Arc<dyn EvaluationSubmitter>,
    evaluation_close: Duration,
}

impl ChatWidget {
    /// Creates the session and shows the greeting.
    ///
    /// A failed session creation is logged and the widget runs without a
    /// session; evaluations are then not sent.
    pub async fn mount(config: &AppConfig, table: Arc<ScenarioTable>, deps: WidgetDeps) -> Self {
        let source = config.widget.source.as_str();
        let session_id = match deps.sessions.create(source).await {
            Ok(id) => {
                tracing::info!(session_id = id.as_str(), source, "Session created");
                Some(id)
            }
            Err(error) => {
                tracing::warn!(error = %error, source, "Session creation failed; continuing without a session");
                None
            }
        };

        let core = WidgetCore::new(config.features.show_timestamp);
        {
            let mut state = core.lock().await;
            core.append(&mut state, greeting(&config.widget, &table));
        }

        let settings = DispatcherSettings {
            scripted_delay: config.timing.scripted_reply_delay(),
            request_timeout: config.api.timeout(),
            escalation_countdown_secs: config.timing.escalation_countdown_secs,
            escalation_tick: config.timing.escalation_tick(),
        };
        let dispatcher = DialogueDispatcher::new(
            Arc::clone(&core),
            DialogueRouter::new(table, config.features.enable_escalation),
            deps.chat,
            StreamRenderer::new(config.timing.stream_interval()),
            settings,
        );

        Self {
            core,
            dispatcher,
            config: config.widget.clone(),
            features: config.features.clone(),
            policy: AttachmentPolicy::default(),
            session_id,
            evaluations: deps.evaluations,
            evaluation_close: config.timing.evaluation_close(),
        }
    }

    /// Mounts the standalone chat that follows a completed pre-chat survey.
    ///
    /// The greeting names the user and the chosen category; the answers are
    /// kept on the widget.
    pub async fn mount_after_survey(
        config: &AppConfig,
        table: Arc<ScenarioTable>,
        deps: WidgetDeps,
        survey: SurveyResponse,
    ) -> Self {
        let config = config.clone().after_survey(&survey);
        tracing::info!(category = %survey.category, "Opening chat after survey");
        let widget = Self::mount(&config, table, deps).await;
        widget.core.lock().await.survey = Some(survey);
        widget
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn features(&self) -> &FeatureFlags {
        &self.features
    }

    pub fn mode(&self) -> InteractionMode {
        self.config.mode
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.core.subscribe()
    }

    // ---- dialogue ----

    /// Sends typed text. Rejected in selection-only mode.
    pub async fn send_text(&self, text: &str) -> Result<DispatchOutcome, WidgetError> {
        if !self.config.mode.accepts_free_text() {
            return Err(WidgetError::InputDisabled);
        }
        self.dispatcher.dispatch(text).await
    }

    /// Sends an option or related question currently on offer.
    pub async fn select_option(&self, label: &str) -> Result<DispatchOutcome, WidgetError> {
        if !self.offered_labels().await.iter().any(|offered| offered == label) {
            return Err(WidgetError::UnknownOption(label.to_string()));
        }
        self.dispatcher.dispatch(label).await
    }

    /// Choices of the most recent assistant message that offered any:
    /// options first, then related questions.
    pub async fn offered_labels(&self) -> Vec<String> {
        let state = self.core.lock().await;
        let offered = state
            .transcript
            .latest_offering()
            .map(Message::offered_labels)
            .unwrap_or_default();
        offered.into_iter().map(str::to_string).collect()
    }

    pub async fn transcript(&self) -> Vec<Message> {
        self.core.lock().await.transcript.messages().to_vec()
    }

    pub async fn dialogue_state(&self) -> DialogueState {
        self.core.lock().await.dialogue
    }

    pub async fn is_loading(&self) -> bool {
        self.core.lock().await.dialogue.is_loading()
    }

    pub async fn escalation(&self) -> EscalationState {
        self.core.lock().await.escalation
    }

    // ---- attachments ----

    /// Checks and stages a file for the next message. Returns the number of
    /// pending attachments.
    pub async fn stage_attachment(
        &self,
        name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<usize, WidgetError> {
        if !self.features.enable_attachment {
            return Err(WidgetError::FeatureDisabled("attachment"));
        }
        let size = bytes.len() as u64;
        self.policy.check(name, mime_type, size)?;

        let mut state = self.core.lock().await;
        let blob = state.blobs.register(bytes);
        state.tray.stage(Attachment {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
            blob,
        });
        let pending = state.tray.len();
        self.core.emit(WidgetEvent::AttachmentsChanged { pending });
        tracing::debug!(name, mime_type, size, pending, "Attachment staged");
        Ok(pending)
    }

    /// Unstages the attachment at `index` and releases its bytes.
    pub async fn remove_attachment(&self, index: usize) -> Result<Attachment, WidgetError> {
        let mut state = self.core.lock().await;
        let removed = state.tray.remove(index)?;
        state.blobs.release(removed.blob);
        let pending = state.tray.len();
        self.core.emit(WidgetEvent::AttachmentsChanged { pending });
        Ok(removed)
    }

    pub async fn pending_attachments(&self) -> Vec<Attachment> {
        self.core.lock().await.tray.iter().cloned().collect()
    }

    /// Number of blob handles still held.
    pub async fn live_blob_count(&self) -> usize {
        self.core.lock().await.blobs.live_count()
    }

    // ---- export ----

    /// Renders the transcript as plain text.
    pub async fn export_transcript(&self, exported_at: Timestamp) -> Result<String, WidgetError> {
        if !self.features.enable_download {
            return Err(WidgetError::FeatureDisabled("download"));
        }
        let state = self.core.lock().await;
        Ok(TranscriptExporter::render(&state.transcript, exported_at))
    }

    pub fn export_file_name(exported_at: Timestamp) -> String {
        TranscriptExporter::file_name(exported_at)
    }

    // ---- survey and evaluation ----

    /// Answers given before the chat opened, if any.
    pub async fn survey(&self) -> Option<SurveyResponse> {
        self.core.lock().await.survey.clone()
    }

    /// A closed evaluation modal bound to this widget's session.
    pub fn evaluation(&self) -> EvaluationFlow {
        EvaluationFlow::new(
            self.session_id.clone(),
            Arc::clone(&self.evaluations),
            self.evaluation_close,
        )
    }

    // ---- teardown ----

    /// Stops every background task and releases all blob handles.
    pub async fn shutdown(&self) {
        self.core.cancel();
        let released = self.core.lock().await.blobs.release_all();
        tracing::info!(released, "Widget shut down");
    }
}

/// Best effort: if a spawned dispatch still holds the state lock the blobs
/// stay registered until that task finishes. [`ChatWidget::shutdown`] always
/// releases them.
impl Drop for ChatWidget {
    fn drop(&mut self) {
        self.core.cancel();
        match self.core.try_lock() {
            Some(mut state) => {
                state.blobs.release_all();
            }
            None => tracing::debug!("Widget state busy at drop; blob handles not released"),
        }
    }
}

fn greeting(widget: &WidgetConfig, table: &ScenarioTable) -> Message {
    let content = widget
        .initial_message
        .clone()
        .unwrap_or_else(|| table.greeting().to_string());
    let options = match &widget.initial_options {
        Some(options) => options.clone(),
        None if widget.mode.shows_initial_menu() => table.root_options().to_vec(),
        None => Vec::new(),
    };
    Message::assistant(content).with_options(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        RecordingEvaluationSubmitter, ScriptedChatCompletion, StaticSessionService,
    };
    use crate::config::Pane;
    use crate::domain::transcript::Role;
    use crate::ports::{ApiError, ChatReply};

    fn deps(chat: ScriptedChatCompletion, sessions: StaticSessionService) -> WidgetDeps {
        WidgetDeps {
            chat: Arc::new(chat),
            sessions: Arc::new(sessions),
            evaluations: Arc::new(RecordingEvaluationSubmitter::new()),
        }
    }

    fn session() -> StaticSessionService {
        StaticSessionService::returning(SessionId::new("sess-1").unwrap())
    }

    async fn mount_with(config: AppConfig, chat: ScriptedChatCompletion) -> ChatWidget {
        let table = ScenarioTable::builtin().unwrap();
        ChatWidget::mount(&config, table, deps(chat, session())).await
    }

    async fn mount(pane: Pane) -> ChatWidget {
        mount_with(AppConfig::default().with_pane(pane), ScriptedChatCompletion::new()).await
    }

    mod mounting {
        use super::*;

        #[tokio::test]
        async fn hybrid_greets_with_root_menu() {
            let widget = mount(Pane::Hybrid).await;
            let table = ScenarioTable::builtin().unwrap();
            let transcript = widget.transcript().await;
            assert_eq!(transcript.len(), 1);
            assert_eq!(transcript[0].role(), Role::Assistant);
            assert_eq!(transcript[0].content(), table.greeting());
            assert_eq!(transcript[0].options(), table.root_options());
            assert_eq!(widget.session_id().map(SessionId::as_str), Some("sess-1"));
        }

        #[tokio::test]
        async fn conversation_greets_without_options() {
            let widget = mount(Pane::Conversation).await;
            let transcript = widget.transcript().await;
            assert_eq!(transcript[0].content(), crate::config::CONVERSATION_GREETING);
            assert!(transcript[0].options().is_empty());
        }

        #[tokio::test]
        async fn failed_session_still_mounts() {
            let table = ScenarioTable::builtin().unwrap();
            let sessions = StaticSessionService::failing(ApiError::network("refused"));
            let widget = ChatWidget::mount(
                &AppConfig::default(),
                table,
                deps(ScriptedChatCompletion::new(), sessions),
            )
            .await;
            assert!(widget.session_id().is_none());
            assert_eq!(widget.transcript().await.len(), 1);
        }
    }

    mod input {
        use super::*;

        #[tokio::test]
        async fn selection_mode_rejects_free_text() {
            let widget = mount(Pane::Selection).await;
            assert_eq!(widget.send_text("こんにちは").await, Err(WidgetError::InputDisabled));
            assert_eq!(widget.transcript().await.len(), 1);
        }

        #[tokio::test]
        async fn unknown_option_is_rejected() {
            let widget = mount(Pane::Hybrid).await;
            assert_eq!(
                widget.select_option("存在しない").await,
                Err(WidgetError::UnknownOption("存在しない".into()))
            );
        }

        #[tokio::test(start_paused = true)]
        async fn offered_option_is_dispatched() {
            let widget = mount(Pane::Selection).await;
            let outcome = widget.select_option("【フラット３５】融資").await.unwrap();
            assert!(matches!(outcome, DispatchOutcome::Scripted { .. }));
            let offered = widget.offered_labels().await;
            assert!(offered.contains(&"商品概要について".to_string()));
        }

        #[tokio::test(start_paused = true)]
        async fn related_questions_are_selectable() {
            let chat = ScriptedChatCompletion::new()
                .with_reply(ChatReply::new("回答").with_related_questions(vec!["金利について".into()]))
                .with_reply(ChatReply::new("金利の回答"));
            let widget = mount_with(AppConfig::default(), chat.clone()).await;

            widget.send_text("質問").await.unwrap();
            widget.select_option("金利について").await.unwrap();
            assert_eq!(chat.call_count(), 2);
        }
    }

    mod attachments {
        use super::*;
        use crate::domain::attachment::AttachmentError;

        #[tokio::test]
        async fn stage_and_remove_release_the_blob() {
            let widget = mount(Pane::Hybrid).await;
            widget.stage_attachment("a.png", "image/png", vec![1, 2, 3]).await.unwrap();
            widget.stage_attachment("b.pdf", "application/pdf", vec![4]).await.unwrap();
            assert_eq!(widget.live_blob_count().await, 2);

            let removed = widget.remove_attachment(0).await.unwrap();
            assert_eq!(removed.name, "a.png");
            assert_eq!(widget.pending_attachments().await.len(), 1);
            assert_eq!(widget.live_blob_count().await, 1);
        }

        #[tokio::test]
        async fn rejected_file_is_not_staged() {
            let widget = mount(Pane::Hybrid).await;
            let result = widget.stage_attachment("a.exe", "application/x-msdownload", vec![1]).await;
            assert!(matches!(
                result,
                Err(WidgetError::Attachment(AttachmentError::UnsupportedType { .. }))
            ));
            assert!(widget.pending_attachments().await.is_empty());
            assert_eq!(widget.live_blob_count().await, 0);
        }

        #[tokio::test]
        async fn disabled_feature_rejects_staging() {
            let widget = mount(Pane::Selection).await;
            assert_eq!(
                widget.stage_attachment("a.png", "image/png", vec![1]).await,
                Err(WidgetError::FeatureDisabled("attachment"))
            );
        }

        #[tokio::test]
        async fn shutdown_releases_every_blob() {
            let widget = mount(Pane::Hybrid).await;
            widget.stage_attachment("a.png", "image/png", vec![1]).await.unwrap();
            widget.shutdown().await;
            assert_eq!(widget.live_blob_count().await, 0);
            assert_eq!(widget.send_text("まだ？").await, Err(WidgetError::ShutDown));
        }

        #[tokio::test]
        async fn drop_releases_blobs_when_state_is_free() {
            let widget = mount(Pane::Hybrid).await;
            widget.stage_attachment("a.png", "image/png", vec![1]).await.unwrap();
            let core = Arc::clone(&widget.core);
            drop(widget);
            assert_eq!(core.lock().await.blobs.live_count(), 0);
            assert!(core.cancel_token().is_cancelled());
        }

        #[tokio::test]
        async fn drop_with_state_locked_still_cancels() {
            let widget = mount(Pane::Hybrid).await;
            widget.stage_attachment("a.png", "image/png", vec![1]).await.unwrap();
            let core = Arc::clone(&widget.core);
            {
                let _held = core.lock().await;
                drop(widget);
            }
            assert!(core.cancel_token().is_cancelled());
            assert_eq!(core.lock().await.blobs.live_count(), 1);
        }
    }

    mod export {
        use super::*;

        #[tokio::test]
        async fn download_disabled_is_rejected() {
            let widget = mount(Pane::Selection).await;
            assert_eq!(
                widget.export_transcript(Timestamp::now()).await,
                Err(WidgetError::FeatureDisabled("download"))
            );
        }

        #[tokio::test]
        async fn export_contains_the_greeting() {
            let widget = mount(Pane::Conversation).await;
            let text = widget.export_transcript(Timestamp::now()).await.unwrap();
            assert!(text.contains(crate::config::CONVERSATION_GREETING));
        }
    }

    mod survey {
        use super::*;

        fn answers(name: Option<&str>) -> SurveyResponse {
            AppConfig::default()
                .survey
                .form()
                .complete(Some("【リ・バース60】について"), name)
                .unwrap()
        }

        #[tokio::test]
        async fn greeting_names_the_user_and_the_category() {
            let widget = ChatWidget::mount_after_survey(
                &AppConfig::default(),
                ScenarioTable::builtin().unwrap(),
                deps(ScriptedChatCompletion::new(), session()),
                answers(Some("山田")),
            )
            .await;

            let transcript = widget.transcript().await;
            assert_eq!(transcript.len(), 1);
            let greeting = transcript[0].content();
            assert!(greeting.starts_with("山田様、"));
            assert!(greeting.contains("「【リ・バース60】について」"));
            assert!(transcript[0].options().is_empty());
            assert_eq!(widget.mode(), InteractionMode::Conversation);
            assert_eq!(widget.survey().await, Some(answers(Some("山田"))));
        }

        #[tokio::test]
        async fn plain_mount_has_no_survey() {
            let widget = mount(Pane::Hybrid).await;
            assert!(widget.survey().await.is_none());
        }
    }
}
