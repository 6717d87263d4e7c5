//! Node types of the menu decision tree.

use serde::Deserialize;

/// A scripted reply reached by selecting its label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScenarioEntry {
    /// Reply text; may contain lightweight markdown.
    pub content: String,
    /// Next-step labels. Empty means the guided path ends here.
    #[serde(default)]
    pub options: Vec<String>,
}

impl ScenarioEntry {
    pub fn new(content: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            content: content.into(),
            options,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.options.is_empty()
    }
}

/// Canned texts for the human hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EscalationScript {
    /// Exact label that requests a human agent.
    pub trigger_label: String,
    /// Sent as soon as escalation is requested.
    pub acknowledgement: String,
    /// Appended to the acknowledgement; `{position}` is substituted.
    pub queue_hint: String,
    /// Queue position announced to the user.
    #[serde(default = "default_queue_position")]
    pub queue_position: u32,
    /// Sent when the countdown expires.
    pub connected_message: String,
}

impl EscalationScript {
    /// Acknowledgement text with the queue hint filled in.
    pub fn acknowledgement_text(&self) -> String {
        let hint = self
            .queue_hint
            .replace("{position}", &self.queue_position.to_string());
        format!("{}\n\n{}", self.acknowledgement, hint)
    }
}

fn default_queue_position() -> u32 {
    1
}
