//! Delays and intervals of the widget's timed behaviour

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Timing configuration. Defaults reproduce the production widget.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TimingConfig {
    /// Pause before a scripted reply appears
    #[serde(default = "default_scripted_delay")]
    pub scripted_reply_delay_ms: u64,

    /// Interval between revealed characters
    #[serde(default = "default_stream_interval")]
    pub stream_interval_ms: u64,

    /// Simulated latency of the demo responder
    #[serde(default = "default_mock_latency")]
    pub mock_latency_ms: u64,

    /// Seconds until the operator is "connected"
    #[serde(default = "default_countdown")]
    pub escalation_countdown_secs: u32,

    /// Length of one countdown tick
    #[serde(default = "default_tick")]
    pub escalation_tick_ms: u64,

    /// How long the thank-you message stays before the modal closes
    #[serde(default = "default_evaluation_close")]
    pub evaluation_close_ms: u64,
}

impl TimingConfig {
    pub fn scripted_reply_delay(&self) -> Duration {
        Duration::from_millis(self.scripted_reply_delay_ms)
    }

    pub fn stream_interval(&self) -> Duration {
        Duration::from_millis(self.stream_interval_ms)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }

    pub fn escalation_tick(&self) -> Duration {
        Duration::from_millis(self.escalation_tick_ms)
    }

    pub fn evaluation_close(&self) -> Duration {
        Duration::from_millis(self.evaluation_close_ms)
    }

    /// Validate timing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.escalation_countdown_secs == 0 {
            return Err(ValidationError::InvalidCountdown);
        }
        if self.escalation_tick_ms == 0 {
            return Err(ValidationError::InvalidInterval("escalation_tick_ms"));
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scripted_reply_delay_ms: default_scripted_delay(),
            stream_interval_ms: default_stream_interval(),
            mock_latency_ms: default_mock_latency(),
            escalation_countdown_secs: default_countdown(),
            escalation_tick_ms: default_tick(),
            evaluation_close_ms: default_evaluation_close(),
        }
    }
}

fn default_scripted_delay() -> u64 {
    500
}

fn default_stream_interval() -> u64 {
    30
}

fn default_mock_latency() -> u64 {
    1000
}

fn default_countdown() -> u32 {
    30
}

fn default_tick() -> u64 {
    1000
}

fn default_evaluation_close() -> u64 {
    1500
}
