//! Interaction modes offered by a widget pane.

use serde::{Deserialize, Serialize};

/// How the user may talk to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Menu choices only; the free-text input is hidden.
    Selection,
    /// Free text only; no initial menu.
    Conversation,
    /// Both menu and free text.
    #[default]
    Hybrid,
}

impl InteractionMode {
    /// Returns true if typed text may be sent.
    pub fn accepts_free_text(&self) -> bool {
        !matches!(self, Self::Selection)
    }

    /// Returns true if the greeting shows the root menu.
    pub fn shows_initial_menu(&self) -> bool {
        !matches!(self, Self::Conversation)
    }
}
