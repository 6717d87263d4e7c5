//! Routes one user utterance to its reply.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

use super::escalation_timer::EscalationTimer;
use super::shared::{WidgetCore, WidgetState};
use super::stream_renderer::{RevealOutcome, StreamRenderer};
use super::{WidgetError, WidgetEvent};
use crate::domain::dialogue::{DialogueRouter, DialogueState, Route};
use crate::domain::foundation::MessageId;
use crate::domain::scenario::ScenarioEntry;
use crate::domain::transcript::Message;
use crate::ports::{ApiError, ChatCompletion, ChatRequest};

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A scenario entry was shown after the scripted delay.
    Scripted { message_id: MessageId },
    /// A conversational reply was fully revealed.
    Streamed { message_id: MessageId },
    /// The acknowledgement was sent and the countdown started.
    Escalated { queue_position: u32 },
    /// The assistant call failed and the apology was sent.
    Failed { message_id: MessageId },
    /// The widget was torn down before the reply finished.
    Interrupted,
}

/// Timings and toggles the dispatcher needs.
#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    pub scripted_delay: Duration,
    pub request_timeout: Duration,
    pub escalation_countdown_secs: u32,
    pub escalation_tick: Duration,
}

/// Resolves utterances: escalation label, then exact scenario key, then
/// the conversational assistant.
pub struct DialogueDispatcher {
    core: Arc<WidgetCore>,
    router: DialogueRouter,
    chat: Arc<dyn ChatCompletion>,
    renderer: StreamRenderer,
    settings: DispatcherSettings,
}

impl DialogueDispatcher {
    pub(crate) fn new(
        core: Arc<WidgetCore>,
        router: DialogueRouter,
        chat: Arc<dyn ChatCompletion>,
        renderer: StreamRenderer,
        settings: DispatcherSettings,
    ) -> Self {
        Self {
            core,
            router,
            chat,
            renderer,
            settings,
        }
    }

    /// Sends `utterance` together with every staged attachment.
    ///
    /// Guard failures (`EmptyInput`, `Busy`, `AlreadyEscalating`) leave the
    /// transcript and the tray untouched.
    pub async fn dispatch(&self, utterance: &str) -> Result<DispatchOutcome, WidgetError> {
        if self.core.is_shut_down() {
            return Err(WidgetError::ShutDown);
        }

        let entry = match self.router.route(utterance) {
            Route::Escalate => return self.escalate(utterance).await,
            Route::Scripted(entry) => Some(entry),
            Route::Fallback => None,
        };

        {
            let mut state = self.core.lock().await;
            Self::check_ready(&state, utterance)?;
            self.append_user(&mut state, utterance);
            self.core.set_dialogue(&mut state, DialogueState::AwaitingReply)?;
        }

        match entry {
            Some(entry) => {
                tracing::debug!(label = utterance, "Scripted reply");
                self.scripted(entry).await
            }
            None => {
                tracing::debug!("No scenario entry; asking the assistant");
                self.converse().await
            }
        }
    }

    fn check_ready(state: &WidgetState, utterance: &str) -> Result<(), WidgetError> {
        if utterance.trim().is_empty() && state.tray.is_empty() {
            return Err(WidgetError::EmptyInput);
        }
        if !state.dialogue.accepts_dispatch() {
            return Err(WidgetError::Busy);
        }
        Ok(())
    }

    fn append_user(&self, state: &mut WidgetState, utterance: &str) {
        let attachments = state.tray.take_all();
        let sent = attachments.len();
        self.core.append(state, Message::user(utterance, attachments));
        if sent > 0 {
            self.core.emit(WidgetEvent::AttachmentsChanged { pending: 0 });
        }
    }

    async fn escalate(&self, utterance: &str) -> Result<DispatchOutcome, WidgetError> {
        let mut state = self.core.lock().await;
        let state = &mut *state;
        Self::check_ready(state, utterance)?;
        if state.escalation.is_escalating() {
            return Err(WidgetError::AlreadyEscalating);
        }
        let script = self.router.table().escalation();
        state
            .escalation
            .begin(self.settings.escalation_countdown_secs, script.queue_position)?;

        self.append_user(state, utterance);
        self.core
            .append(state, Message::assistant(script.acknowledgement_text()));
        self.core.emit(WidgetEvent::EscalationStarted {
            remaining_seconds: state.escalation.remaining_seconds(),
            queue_position: script.queue_position,
        });
        tracing::info!(
            countdown_secs = self.settings.escalation_countdown_secs,
            queue_position = script.queue_position,
            "Escalation requested"
        );

        EscalationTimer::new(self.settings.escalation_tick, script.connected_message.clone())
            .spawn(Arc::clone(&self.core));

        Ok(DispatchOutcome::Escalated {
            queue_position: script.queue_position,
        })
    }

    async fn scripted(&self, entry: &ScenarioEntry) -> Result<DispatchOutcome, WidgetError> {
        let cancel = self.core.cancel_token();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.settle().await;
                return Ok(DispatchOutcome::Interrupted);
            }
            _ = sleep(self.settings.scripted_delay) => {}
        }

        let mut state = self.core.lock().await;
        let message_id = self.core.append(
            &mut state,
            Message::assistant(entry.content.clone()).with_options(entry.options.clone()),
        );
        self.core.set_dialogue(&mut state, DialogueState::Idle)?;
        Ok(DispatchOutcome::Scripted { message_id })
    }

    async fn converse(&self) -> Result<DispatchOutcome, WidgetError> {
        let request = {
            let state = self.core.lock().await;
            ChatRequest::from_transcript(&state.transcript)
        };

        let cancel = self.core.cancel_token();
        let limit = self.settings.request_timeout;
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.settle().await;
                return Ok(DispatchOutcome::Interrupted);
            }
            result = timeout(limit, self.chat.complete(request)) => result,
        };

        let reply = match result {
            Ok(Ok(reply)) => reply,
            Ok(Err(error)) => return self.apologise(error).await,
            Err(_) => {
                return self
                    .apologise(ApiError::Timeout {
                        timeout_secs: limit.as_secs(),
                    })
                    .await
            }
        };

        {
            let mut state = self.core.lock().await;
            self.core.set_dialogue(&mut state, DialogueState::Streaming)?;
        }
        let revealed = self.renderer.reveal(self.core.as_ref(), reply, &cancel).await;
        self.settle().await;

        match revealed? {
            RevealOutcome::Completed { id, .. } => Ok(DispatchOutcome::Streamed { message_id: id }),
            RevealOutcome::Cancelled { .. } => Ok(DispatchOutcome::Interrupted),
        }
    }

    async fn apologise(&self, error: ApiError) -> Result<DispatchOutcome, WidgetError> {
        tracing::warn!(error = %error, "Chat completion failed; sending apology");
        let mut state = self.core.lock().await;
        let apology = self.router.table().apology().to_string();
        let message_id = self.core.append(&mut state, Message::assistant(apology));
        self.core.set_dialogue(&mut state, DialogueState::Idle)?;
        Ok(DispatchOutcome::Failed { message_id })
    }

    /// Returns the dialogue to Idle whatever happened to the turn.
    async fn settle(&self) {
        let mut state = self.core.lock().await;
        if state.dialogue != DialogueState::Idle {
            if let Err(error) = self.core.set_dialogue(&mut state, DialogueState::Idle) {
                tracing::warn!(error = %error, "Could not settle dialogue state");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::ScriptedChatCompletion;
    use crate::domain::attachment::Attachment;
    use crate::domain::foundation::BlobId;
    use crate::domain::scenario::ScenarioTable;
    use crate::domain::transcript::Role;
    use crate::ports::ChatReply;
    use tokio::time::Instant;

    fn settings() -> DispatcherSettings {
        DispatcherSettings {
            scripted_delay: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
            escalation_countdown_secs: 30,
            escalation_tick: Duration::from_secs(1),
        }
    }

    fn dispatcher_with(
        chat: ScriptedChatCompletion,
        settings: DispatcherSettings,
        escalation_enabled: bool,
    ) -> DialogueDispatcher {
        let table = ScenarioTable::builtin().unwrap();
        let router = DialogueRouter::new(table, escalation_enabled);
        DialogueDispatcher::new(
            WidgetCore::new(false),
            router,
            Arc::new(chat),
            StreamRenderer::new(Duration::from_millis(30)),
            settings,
        )
    }

    fn dispatcher(chat: ScriptedChatCompletion) -> DialogueDispatcher {
        dispatcher_with(chat, settings(), true)
    }

    async fn messages(d: &DialogueDispatcher) -> Vec<Message> {
        d.core.lock().await.transcript.messages().to_vec()
    }

    mod guards {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn empty_input_without_attachments_is_rejected() {
            let d = dispatcher(ScriptedChatCompletion::new());
            assert_eq!(d.dispatch("   ").await, Err(WidgetError::EmptyInput));
            assert!(messages(&d).await.is_empty());
        }

        #[tokio::test(start_paused = true)]
        async fn empty_input_with_attachment_is_sent() {
            let chat = ScriptedChatCompletion::new().with_reply(ChatReply::new("受け取りました"));
            let d = dispatcher(chat);
            d.core.lock().await.tray.stage(Attachment {
                name: "a.png".into(),
                mime_type: "image/png".into(),
                size: 3,
                blob: BlobId::new(),
            });

            d.dispatch("").await.unwrap();
            let sent = messages(&d).await;
            assert_eq!(sent[0].role(), Role::User);
            assert_eq!(sent[0].attachments().len(), 1);
            assert!(d.core.lock().await.tray.is_empty());
        }

        #[tokio::test(start_paused = true)]
        async fn second_dispatch_while_loading_is_a_no_op() {
            let chat = ScriptedChatCompletion::new()
                .with_reply(ChatReply::new("遅い回答"))
                .with_delay(Duration::from_secs(2));
            let d = Arc::new(dispatcher(chat));

            let first = {
                let d = Arc::clone(&d);
                tokio::spawn(async move { d.dispatch("質問").await })
            };
            sleep(Duration::from_millis(100)).await;

            assert_eq!(d.dispatch("もう一つ").await, Err(WidgetError::Busy));
            assert_eq!(messages(&d).await.len(), 1);

            first.await.unwrap().unwrap();
            assert_eq!(messages(&d).await.len(), 2);
        }
    }

    mod scripted {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn reply_matches_entry_after_delay() {
            let d = dispatcher(ScriptedChatCompletion::new());
            let label = "【フラット３５】融資";
            let started = Instant::now();

            let outcome = d.dispatch(label).await.unwrap();

            assert!(matches!(outcome, DispatchOutcome::Scripted { .. }));
            assert!(started.elapsed() >= Duration::from_millis(500));
            let entry = d.router.table().lookup(label).unwrap().clone();
            let sent = messages(&d).await;
            assert_eq!(sent.len(), 2);
            assert_eq!(sent[1].content(), entry.content);
            assert_eq!(sent[1].options(), entry.options.as_slice());
        }

        #[tokio::test(start_paused = true)]
        async fn does_not_call_the_assistant() {
            let chat = ScriptedChatCompletion::new();
            let d = dispatcher(chat.clone());
            d.dispatch("最初のメニューに戻る").await.unwrap();
            assert_eq!(chat.call_count(), 0);
        }

        #[tokio::test(start_paused = true)]
        async fn return_label_yields_root_menu() {
            let d = dispatcher(ScriptedChatCompletion::new());
            d.dispatch("最初のメニューに戻る").await.unwrap();
            let sent = messages(&d).await;
            assert_eq!(sent[1].options(), d.router.table().root_options());
        }
    }

    mod fallback {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn streams_reply_with_menus() {
            let reply = ChatReply::new("回答です")
                .with_options(vec!["次".into()])
                .with_related_questions(vec!["関連".into()]);
            let chat = ScriptedChatCompletion::new().with_reply(reply);
            let d = dispatcher(chat.clone());

            let outcome = d.dispatch("金利を教えて").await.unwrap();

            assert!(matches!(outcome, DispatchOutcome::Streamed { .. }));
            let sent = messages(&d).await;
            assert_eq!(sent[1].content(), "回答です");
            assert_eq!(sent[1].options(), ["次".to_string()]);
            assert_eq!(sent[1].related_questions(), ["関連".to_string()]);
            assert_eq!(d.core.lock().await.dialogue, DialogueState::Idle);

            let request = &chat.calls()[0];
            assert_eq!(request.last_user_text(), Some("金利を教えて"));
        }

        #[tokio::test(start_paused = true)]
        async fn failure_appends_apology_without_menus() {
            let chat = ScriptedChatCompletion::new().with_error(ApiError::status(503, "down"));
            let d = dispatcher(chat);

            let outcome = d.dispatch("金利を教えて").await.unwrap();

            assert!(matches!(outcome, DispatchOutcome::Failed { .. }));
            let sent = messages(&d).await;
            assert_eq!(sent.len(), 2);
            assert_eq!(sent[1].content(), d.router.table().apology());
            assert!(sent[1].options().is_empty());
            assert!(sent[1].related_questions().is_empty());
        }

        #[tokio::test(start_paused = true)]
        async fn stalled_assistant_times_out_into_apology() {
            let chat = ScriptedChatCompletion::new()
                .with_reply(ChatReply::new("遅すぎる"))
                .with_delay(Duration::from_secs(120));
            let d = dispatcher_with(
                chat,
                DispatcherSettings {
                    request_timeout: Duration::from_secs(5),
                    ..settings()
                },
                true,
            );

            let outcome = d.dispatch("質問").await.unwrap();
            assert!(matches!(outcome, DispatchOutcome::Failed { .. }));
            assert_eq!(d.core.lock().await.dialogue, DialogueState::Idle);
        }

        #[tokio::test(start_paused = true)]
        async fn teardown_interrupts_the_reveal() {
            let chat = ScriptedChatCompletion::new().with_reply(ChatReply::new("とても長い回答の文章です"));
            let d = Arc::new(dispatcher(chat));
            let running = {
                let d = Arc::clone(&d);
                tokio::spawn(async move { d.dispatch("質問").await })
            };
            sleep(Duration::from_millis(100)).await;
            d.core.cancel();

            assert_eq!(running.await.unwrap(), Ok(DispatchOutcome::Interrupted));
            let sent = messages(&d).await;
            assert!(sent[1].content().chars().count() < "とても長い回答の文章です".chars().count());
        }
    }

    mod escalation {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn acknowledges_and_starts_countdown() {
            let d = dispatcher(ScriptedChatCompletion::new());
            let outcome = d.dispatch("オペレーターと話す").await.unwrap();

            assert_eq!(outcome, DispatchOutcome::Escalated { queue_position: 1 });
            let sent = messages(&d).await;
            assert_eq!(sent.len(), 2);
            assert!(sent[1].content().contains("現在の順番待ち：**1番目**"));
            let state = d.core.lock().await;
            assert!(state.escalation.is_escalating());
            assert_eq!(state.escalation.remaining_seconds(), 30);
            assert_eq!(state.dialogue, DialogueState::Idle);
        }

        #[tokio::test(start_paused = true)]
        async fn repeated_request_while_counting_is_rejected() {
            let d = dispatcher(ScriptedChatCompletion::new());
            d.dispatch("オペレーターと話す").await.unwrap();
            assert_eq!(
                d.dispatch("オペレーターと話す").await,
                Err(WidgetError::AlreadyEscalating)
            );
            assert_eq!(messages(&d).await.len(), 2);
        }

        #[tokio::test(start_paused = true)]
        async fn disabled_escalation_uses_fallback() {
            let chat = ScriptedChatCompletion::new().with_reply(ChatReply::new("AIの回答"));
            let d = dispatcher_with(chat.clone(), settings(), false);
            let outcome = d.dispatch("オペレーターと話す").await.unwrap();
            assert!(matches!(outcome, DispatchOutcome::Streamed { .. }));
            assert_eq!(chat.call_count(), 1);
        }
    }
}
