//! Attachment domain module.
//!
//! Files staged for the next user message: the acceptance policy, the
//! registry of locally held bytes, and the pending tray.

mod blob;
mod policy;
mod tray;

pub use blob::BlobRegistry;
pub use policy::{AttachmentPolicy, DEFAULT_ALLOWED_MIME_TYPES, DEFAULT_MAX_BYTES};
pub use tray::AttachmentTray;

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::BlobId;

/// A file attached to a user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Original file name.
    pub name: String,
    /// MIME type reported at selection time.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Handle to the bytes in the widget's blob registry.
    pub blob: BlobId,
}

/// Errors raised while staging or removing attachments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("'{name}' has unsupported type {mime_type}")]
    UnsupportedType { name: String, mime_type: String },

    #[error("'{name}' is {size} bytes, larger than the {max} byte limit")]
    TooLarge { name: String, size: u64, max: u64 },

    #[error("'{name}' is empty")]
    EmptyFile { name: String },

    #[error("No staged attachment at position {0}")]
    NoSuchAttachment(usize),
}
