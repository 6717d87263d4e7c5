//! Transcript domain module.
//!
//! The ordered, append-only log of exchanged messages that every other
//! component reads and appends to, plus its plain-text export.

mod export;
mod message;
mod store;

pub use export::TranscriptExporter;
pub use message::{Message, Role};
pub use store::{TranscriptError, TranscriptStore};
