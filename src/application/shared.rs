//! State shared by a widget and its background tasks.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

use super::stream_renderer::RevealSink;
use super::{WidgetError, WidgetEvent};
use crate::domain::attachment::{AttachmentTray, BlobRegistry};
use crate::domain::dialogue::DialogueState;
use crate::domain::escalation::EscalationState;
use crate::domain::foundation::{MessageId, StateMachine, Timestamp};
use crate::domain::survey::SurveyResponse;
use crate::domain::transcript::{Message, TranscriptStore};

const EVENT_CAPACITY: usize = 4096;

/// Everything one widget owns exclusively.
#[derive(Debug, Default)]
pub(crate) struct WidgetState {
    pub(crate) transcript: TranscriptStore,
    pub(crate) dialogue: DialogueState,
    pub(crate) escalation: EscalationState,
    pub(crate) tray: AttachmentTray,
    pub(crate) blobs: BlobRegistry,
    pub(crate) survey: Option<SurveyResponse>,
}

/// Widget state behind one lock, plus the channels and cancellation token
/// its tasks share. The lock is never held across a sleep or remote call.
#[derive(Debug)]
pub(crate) struct WidgetCore {
    state: Mutex<WidgetState>,
    dialogue_tx: watch::Sender<DialogueState>,
    events: broadcast::Sender<WidgetEvent>,
    cancel: CancellationToken,
    show_timestamp: bool,
}

impl WidgetCore {
    pub(crate) fn new(show_timestamp: bool) -> Arc<Self> {
        let (dialogue_tx, _) = watch::channel(DialogueState::Idle);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            state: Mutex::new(WidgetState::default()),
            dialogue_tx,
            events,
            cancel: CancellationToken::new(),
            show_timestamp,
        })
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, WidgetState> {
        self.state.lock().await
    }

    pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, WidgetState>> {
        self.state.try_lock().ok()
    }

    pub(crate) fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }

    pub(crate) fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.events.subscribe()
    }

    pub(crate) fn watch_dialogue(&self) -> watch::Receiver<DialogueState> {
        self.dialogue_tx.subscribe()
    }

    /// Publishes an event. Having no subscribers is fine.
    pub(crate) fn emit(&self, event: WidgetEvent) {
        let _ = self.events.send(event);
    }

    /// Stamps (if configured) and appends a message.
    pub(crate) fn append(&self, state: &mut WidgetState, message: Message) -> MessageId {
        let message = message.with_timestamp(self.show_timestamp.then(Timestamp::now));
        let id = message.id();
        let index = state.transcript.append(message.clone());
        self.emit(WidgetEvent::MessageAppended { index, message });
        id
    }

    /// Moves the dialogue state machine and mirrors it to watchers.
    pub(crate) fn set_dialogue(
        &self,
        state: &mut WidgetState,
        target: DialogueState,
    ) -> Result<(), WidgetError> {
        let was_loading = state.dialogue.is_loading();
        state.dialogue = state.dialogue.transition_to(target)?;
        self.dialogue_tx.send_replace(target);
        if was_loading != target.is_loading() {
            self.emit(WidgetEvent::LoadingChanged {
                loading: target.is_loading(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RevealSink for WidgetCore {
    async fn open(&self, placeholder: Message) -> Result<MessageId, WidgetError> {
        let mut state = self.lock().await;
        Ok(self.append(&mut state, placeholder))
    }

    async fn extend(&self, id: MessageId, delta: char) -> Result<(), WidgetError> {
        let mut state = self.lock().await;
        state.transcript.update_last(id, |content| content.push(delta))?;
        let index = state.transcript.len() - 1;
        self.emit(WidgetEvent::MessageExtended { index, id, delta });
        Ok(())
    }

    async fn finish(&self, id: MessageId) {
        let state = self.lock().await;
        let index = state.transcript.len().saturating_sub(1);
        self.emit(WidgetEvent::StreamCompleted { index, id });
    }
}
