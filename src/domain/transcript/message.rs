//! A single turn in the chat transcript.

use serde::{Deserialize, Serialize};

use crate::domain::attachment::Attachment;
use crate::domain::foundation::{MessageId, Timestamp};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used in exported transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "お客様",
            Role::Assistant => "サポート",
        }
    }
}

/// One message in the transcript.
///
/// The role is fixed at construction. Options, related questions and
/// attachments are set by the builder methods and never change afterwards;
/// only the content of the newest message may grow (see
/// [`TranscriptStore::update_last`](super::TranscriptStore::update_last)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    options: Vec<String>,
    related_questions: Vec<String>,
    attachments: Vec<Attachment>,
    timestamp: Option<Timestamp>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            options: Vec::new(),
            related_questions: Vec::new(),
            attachments: Vec::new(),
            timestamp: None,
        }
    }

    /// Creates a user message carrying any attachments sent with it.
    pub fn user(content: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            attachments,
            ..Self::new(Role::User, content)
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Sets the follow-up menu. Ignored on user messages.
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        if self.role == Role::Assistant {
            self.options = options;
        }
        self
    }

    /// Sets the suggested follow-up questions. Ignored on user messages.
    pub fn with_related_questions(mut self, questions: Vec<String>) -> Self {
        if self.role == Role::Assistant {
            self.related_questions = questions;
        }
        self
    }

    pub fn with_timestamp(mut self, timestamp: Option<Timestamp>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn related_questions(&self) -> &[String] {
        &self.related_questions
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// Every label a user can pick from this message: options first, then
    /// related questions. Front ends number their menus in this order.
    pub fn offered_labels(&self) -> Vec<&str> {
        self.options
            .iter()
            .chain(self.related_questions.iter())
            .map(String::as_str)
            .collect()
    }

    pub(super) fn content_mut(&mut self) -> &mut String {
        &mut self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::BlobId;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn assistant_message_keeps_menu_and_questions() {
        let message = Message::assistant("選択してください")
            .with_options(vec!["A".into(), "B".into()])
            .with_related_questions(vec!["Q".into()]);
        assert_eq!(message.role(), Role::Assistant);
        assert_eq!(message.options(), ["A", "B"]);
        assert_eq!(message.related_questions(), ["Q"]);
        assert_eq!(message.offered_labels(), vec!["A", "B", "Q"]);
    }

    #[test]
    fn user_message_never_carries_a_menu() {
        let message = Message::user("hi", Vec::new()).with_options(vec!["A".into()]);
        assert!(message.options().is_empty());
        assert!(message.offered_labels().is_empty());
    }

    #[test]
    fn user_message_keeps_attachments() {
        let attachment = Attachment {
            name: "a.png".into(),
            mime_type: "image/png".into(),
            size: 3,
            blob: BlobId::new(),
        };
        let message = Message::user("", vec![attachment.clone()]);
        assert_eq!(message.attachments(), [attachment]);
    }

    #[test]
    fn timestamp_is_optional() {
        assert!(Message::assistant("x").timestamp().is_none());
        let ts = Timestamp::now();
        assert_eq!(Message::assistant("x").with_timestamp(Some(ts)).timestamp(), Some(ts));
    }
}
