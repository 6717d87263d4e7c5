//! Registry of attachment bytes held by one widget instance.
//!
//! Every handle handed out must eventually be released: when its staged
//! attachment is removed, or when the widget is torn down.

use std::collections::HashMap;

use crate::domain::foundation::BlobId;

/// Locally held attachment bytes keyed by handle.
#[derive(Debug, Default)]
pub struct BlobRegistry {
    blobs: HashMap<BlobId, Vec<u8>>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores bytes and returns a fresh handle.
    pub fn register(&mut self, bytes: Vec<u8>) -> BlobId {
        let id = BlobId::new();
        self.blobs.insert(id, bytes);
        id
    }

    /// Frees a handle. Returns false if it was already released.
    pub fn release(&mut self, id: BlobId) -> bool {
        self.blobs.remove(&id).is_some()
    }

    /// Frees every handle, returning how many were live.
    pub fn release_all(&mut self) -> usize {
        let count = self.blobs.len();
        self.blobs.clear();
        count
    }

    pub fn get(&self, id: BlobId) -> Option<&[u8]> {
        self.blobs.get(&id).map(Vec::as_slice)
    }

    /// Number of handles not yet released.
    pub fn live_count(&self) -> usize {
        self.blobs.len()
    }
}
