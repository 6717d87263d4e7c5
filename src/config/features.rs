//! Feature flags configuration

use serde::Deserialize;

/// Toggles for optional widget affordances
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Allow staging files on the next message
    #[serde(default = "enabled")]
    pub enable_attachment: bool,

    /// Allow downloading the transcript as text
    #[serde(default = "enabled")]
    pub enable_download: bool,

    /// Route the escalation label to the operator hand-off
    #[serde(default = "enabled")]
    pub enable_escalation: bool,

    /// Stamp messages with the local time
    #[serde(default = "enabled")]
    pub show_timestamp: bool,
}

impl FeatureFlags {
    /// Every toggle off, as in the selection-only pane.
    pub fn none() -> Self {
        Self {
            enable_attachment: false,
            enable_download: false,
            enable_escalation: false,
            show_timestamp: false,
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_attachment: true,
            enable_download: true,
            enable_escalation: true,
            show_timestamp: true,
        }
    }
}

fn enabled() -> bool {
    true
}
