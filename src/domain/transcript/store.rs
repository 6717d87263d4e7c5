//! Append-only message log for one widget instance.

use thiserror::Error;

use super::{Message, Role};
use crate::domain::foundation::MessageId;

/// Errors from tail updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    #[error("Transcript is empty")]
    Empty,

    #[error("Expected message {expected} at the tail, found {actual}")]
    TailMismatch {
        expected: MessageId,
        actual: MessageId,
    },
}

/// Ordered transcript. Display order equals append order.
///
/// Supports exactly two mutations: `append`, and `update_last` which may
/// only grow or rewrite the newest message's content.
#[derive(Debug, Clone, Default)]
pub struct TranscriptStore {
    messages: Vec<Message>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns its index.
    pub fn append(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Mutates the content of the newest message.
    ///
    /// `expected` must be the id of the tail; anything appended after the
    /// caller's message makes this fail instead of editing the wrong turn.
    pub fn update_last<F>(&mut self, expected: MessageId, mutate: F) -> Result<&Message, TranscriptError>
    where
        F: FnOnce(&mut String),
    {
        let last = self.messages.last_mut().ok_or(TranscriptError::Empty)?;
        if last.id() != expected {
            return Err(TranscriptError::TailMismatch {
                expected,
                actual: last.id(),
            });
        }
        mutate(last.content_mut());
        Ok(last)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The most recent message offering options or related questions.
    /// Its menu is the one a selection is checked against.
    pub fn latest_offering(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| !m.offered_labels().is_empty())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Role and content of every message, in order, for the chat request.
    pub fn api_messages(&self) -> impl Iterator<Item = (Role, &str)> {
        self.messages.iter().map(|m| (m.role(), m.content()))
    }
}
