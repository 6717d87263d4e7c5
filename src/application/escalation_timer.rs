//! Background countdown for the simulated operator hand-off.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::shared::WidgetCore;
use super::WidgetEvent;
use crate::domain::dialogue::DialogueState;
use crate::domain::escalation::TickOutcome;
use crate::domain::transcript::Message;

/// Ticks a widget's escalation countdown until it connects.
///
/// The connected message is only appended while the dialogue is idle, so a
/// reply being revealed is never interrupted by it.
#[derive(Debug, Clone)]
pub(crate) struct EscalationTimer {
    tick: Duration,
    connected_message: String,
}

impl EscalationTimer {
    pub(crate) fn new(tick: Duration, connected_message: impl Into<String>) -> Self {
        Self {
            tick,
            connected_message: connected_message.into(),
        }
    }

    /// Runs the countdown on its own task; widget teardown stops it.
    pub(crate) fn spawn(self, core: Arc<WidgetCore>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(core).await })
    }

    async fn run(self, core: Arc<WidgetCore>) {
        let cancel = core.cancel_token();
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("Escalation countdown stopped by teardown");
                    return;
                }
                _ = sleep(self.tick) => {}
            }

            let mut state = core.lock().await;
            match state.escalation.remaining_seconds() {
                0 => return,
                1 => {
                    drop(state);
                    self.connect(&core, &cancel).await;
                    return;
                }
                _ => {
                    if let TickOutcome::Remaining(remaining_seconds) = state.escalation.tick() {
                        core.emit(WidgetEvent::EscalationTick { remaining_seconds });
                    }
                }
            }
        }
    }

    async fn connect(&self, core: &WidgetCore, cancel: &CancellationToken) {
        let mut dialogue = core.watch_dialogue();
        loop {
            let idle = tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                idle = wait_for_idle(&mut dialogue) => idle,
            };
            if !idle {
                return;
            }

            let mut state = core.lock().await;
            if !state.dialogue.accepts_dispatch() {
                // A new dispatch started between the wake-up and the lock.
                continue;
            }
            if state.escalation.tick() == TickOutcome::Connected {
                core.append(&mut state, Message::assistant(self.connected_message.clone()));
                core.emit(WidgetEvent::EscalationConnected);
                tracing::info!("Operator connected");
            }
            return;
        }
    }
}

async fn wait_for_idle(rx: &mut watch::Receiver<DialogueState>) -> bool {
    rx.wait_for(DialogueState::accepts_dispatch).await.is_ok()
}
