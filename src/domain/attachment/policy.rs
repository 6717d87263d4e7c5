//! Acceptance rules checked synchronously when a file is selected.

use super::AttachmentError;

/// MIME types accepted by default.
pub const DEFAULT_ALLOWED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "application/pdf",
    "text/plain",
];

/// Default size cap: 10 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Which files may be staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPolicy {
    allowed_mime_types: Vec<String>,
    max_bytes: u64,
}

impl AttachmentPolicy {
    /// Creates a policy from an explicit allow-list and size cap.
    pub fn new(allowed_mime_types: Vec<String>, max_bytes: u64) -> Self {
        Self {
            allowed_mime_types,
            max_bytes,
        }
    }

    /// Returns the size cap in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Checks a candidate file. Nothing is staged when this fails.
    pub fn check(&self, name: &str, mime_type: &str, size: u64) -> Result<(), AttachmentError> {
        if size == 0 {
            return Err(AttachmentError::EmptyFile {
                name: name.to_string(),
            });
        }
        if size > self.max_bytes {
            return Err(AttachmentError::TooLarge {
                name: name.to_string(),
                size,
                max: self.max_bytes,
            });
        }
        let accepted = self
            .allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime_type));
        if !accepted {
            return Err(AttachmentError::UnsupportedType {
                name: name.to_string(),
                mime_type: mime_type.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_MIME_TYPES.iter().map(|m| m.to_string()).collect(),
            DEFAULT_MAX_BYTES,
        )
    }
}
