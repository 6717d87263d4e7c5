//! Attachments staged for the next user message.

use super::{Attachment, AttachmentError};

/// Pending attachments, in selection order.
///
/// The tray owns staged attachments only until they are sent; `take_all`
/// moves them into the outgoing message, after which tray operations can no
/// longer reach them.
#[derive(Debug, Clone, Default)]
pub struct AttachmentTray {
    staged: Vec<Attachment>,
}

impl AttachmentTray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, attachment: Attachment) {
        self.staged.push(attachment);
    }

    /// Removes one staged attachment. The caller releases its blob.
    pub fn remove(&mut self, index: usize) -> Result<Attachment, AttachmentError> {
        if index >= self.staged.len() {
            return Err(AttachmentError::NoSuchAttachment(index));
        }
        Ok(self.staged.remove(index))
    }

    /// Empties the tray for sending.
    pub fn take_all(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.staged)
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.staged.iter()
    }
}
