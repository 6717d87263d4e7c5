//! Plain-text transcript export offered as a download.

use chrono::{Local, TimeZone};
use std::fmt::Display;

use super::TranscriptStore;
use crate::domain::foundation::{Timestamp, EXPORT_LABEL_FORMAT, TIME_LABEL_FORMAT};

const HEADER_RULE: &str = "========================================";
const MESSAGE_RULE: &str = "----------------------------------------";

/// Renders a transcript as a plain-text document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptExporter;

impl TranscriptExporter {
    /// Renders in the local time zone.
    pub fn render(transcript: &TranscriptStore, exported_at: Timestamp) -> String {
        Self::render_in(transcript, exported_at, &Local)
    }

    /// Renders with time labels in `tz`.
    pub fn render_in<Tz>(transcript: &TranscriptStore, exported_at: Timestamp, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut lines = vec![
            format!(
                "チャット履歴 (出力日時: {})",
                exported_at.format_in(tz, EXPORT_LABEL_FORMAT)
            ),
            HEADER_RULE.to_string(),
        ];

        for message in transcript.iter() {
            let speaker = match message.timestamp() {
                Some(ts) => format!("[{}] {}:", ts.format_in(tz, TIME_LABEL_FORMAT), message.role().label()),
                None => format!("{}:", message.role().label()),
            };
            lines.push(speaker);
            lines.push(message.content().to_string());
            if !message.attachments().is_empty() {
                let names: Vec<&str> = message.attachments().iter().map(|a| a.name.as_str()).collect();
                lines.push(format!("添付ファイル: {}", names.join(", ")));
            }
            lines.push(MESSAGE_RULE.to_string());
        }

        let mut document = lines.join("\n");
        document.push('\n');
        document
    }

    /// Default download file name.
    pub fn file_name(exported_at: Timestamp) -> String {
        format!("chat-transcript-{}.txt", exported_at.file_stamp())
    }
}
