//! Countdown state for the human hand-off.

use serde::Serialize;
use thiserror::Error;

/// Phase of the hand-off for one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum EscalationPhase {
    #[default]
    Idle,
    Counting { remaining: u32 },
    Connected,
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still waiting; the new remaining seconds.
    Remaining(u32),
    /// The countdown hit zero on this tick.
    Connected,
    /// No countdown is running.
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscalationError {
    #[error("An escalation countdown is already running")]
    AlreadyCounting,

    #[error("Countdown must be at least one second")]
    ZeroCountdown,
}

/// Escalation snapshot exposed to front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct EscalationState {
    phase: EscalationPhase,
    queue_position: u32,
}

impl EscalationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EscalationPhase {
        self.phase
    }

    pub fn queue_position(&self) -> u32 {
        self.queue_position
    }

    /// True while the countdown runs.
    pub fn is_escalating(&self) -> bool {
        matches!(self.phase, EscalationPhase::Counting { .. })
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.phase, EscalationPhase::Connected)
    }

    /// Seconds left, or 0 when not counting.
    pub fn remaining_seconds(&self) -> u32 {
        match self.phase {
            EscalationPhase::Counting { remaining } => remaining,
            _ => 0,
        }
    }

    /// Starts a countdown. A previous connection may be escalated again.
    pub fn begin(&mut self, countdown_secs: u32, queue_position: u32) -> Result<(), EscalationError> {
        if self.is_escalating() {
            return Err(EscalationError::AlreadyCounting);
        }
        if countdown_secs == 0 {
            return Err(EscalationError::ZeroCountdown);
        }
        self.phase = EscalationPhase::Counting {
            remaining: countdown_secs,
        };
        self.queue_position = queue_position;
        Ok(())
    }

    /// Decrements the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        match self.phase {
            EscalationPhase::Counting { remaining } if remaining > 1 => {
                self.phase = EscalationPhase::Counting {
                    remaining: remaining - 1,
                };
                TickOutcome::Remaining(remaining - 1)
            }
            EscalationPhase::Counting { .. } => {
                self.phase = EscalationPhase::Connected;
                TickOutcome::Connected
            }
            _ => TickOutcome::Inactive,
        }
    }
}
