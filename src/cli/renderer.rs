//! Writes widget events to a terminal.

use std::io::{self, Write};

use support_chat::application::WidgetEvent;
use support_chat::domain::foundation::MessageId;
use support_chat::domain::transcript::{Message, Role};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false))
}

/// Renders messages as they are appended and revealed.
///
/// Choices of a streamed reply are held back until its `StreamCompleted`.
pub struct TerminalRenderer<W: Write> {
    out: W,
    color: bool,
    streaming: Option<Message>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            streaming: None,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints messages that existed before the renderer subscribed.
    pub fn render_transcript(&mut self, messages: &[Message]) -> io::Result<()> {
        for message in messages {
            self.write_message(message)?;
        }
        self.out.flush()
    }

    pub fn handle(&mut self, event: &WidgetEvent) -> io::Result<()> {
        match event {
            WidgetEvent::MessageAppended { message, .. } => {
                self.streaming = None;
                if message.role() == Role::Assistant && message.content().is_empty() {
                    self.write_header(message)?;
                    self.streaming = Some(message.clone());
                } else {
                    self.write_message(message)?;
                }
            }
            WidgetEvent::MessageExtended { delta, .. } => {
                write!(self.out, "{delta}")?;
            }
            WidgetEvent::StreamCompleted { id, .. } => {
                writeln!(self.out)?;
                if let Some(message) = self.take_streaming(*id) {
                    self.write_choices(&message)?;
                }
                writeln!(self.out)?;
            }
            WidgetEvent::LoadingChanged { .. } => {}
            WidgetEvent::EscalationStarted {
                remaining_seconds,
                queue_position,
            } => {
                let line = format!(
                    "オペレーター接続まで残り {remaining_seconds} 秒（順番待ち {queue_position} 番目）"
                );
                self.note(YELLOW, &line)?;
            }
            WidgetEvent::EscalationTick { remaining_seconds } => {
                if *remaining_seconds % 10 == 0 || *remaining_seconds <= 3 {
                    self.note(YELLOW, &format!("接続まで残り {remaining_seconds} 秒"))?;
                }
            }
            WidgetEvent::EscalationConnected => {}
            WidgetEvent::AttachmentsChanged { pending } => {
                self.note(CYAN, &format!("添付待ち: {pending} 件"))?;
            }
        }
        self.out.flush()
    }

    /// Prints a one-line notice outside the transcript.
    pub fn note(&mut self, color: &str, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{color}{text}{RESET}")?;
        } else {
            writeln!(self.out, "{text}")?;
        }
        self.out.flush()
    }

    fn take_streaming(&mut self, id: MessageId) -> Option<Message> {
        match self.streaming.take() {
            Some(message) if message.id() == id => Some(message),
            other => {
                self.streaming = other;
                None
            }
        }
    }

    fn write_header(&mut self, message: &Message) -> io::Result<()> {
        let stamp = message
            .timestamp()
            .map(|t| format!("[{}] ", t.time_label()))
            .unwrap_or_default();
        let label = message.role().label();
        match (self.color, message.role()) {
            (true, Role::Assistant) => writeln!(self.out, "{DIM}{stamp}{RESET}{BOLD}{GREEN}{label}:{RESET}"),
            (true, Role::User) => writeln!(self.out, "{DIM}{stamp}{RESET}{BOLD}{label}:{RESET}"),
            (false, _) => writeln!(self.out, "{stamp}{label}:"),
        }
    }

    fn write_message(&mut self, message: &Message) -> io::Result<()> {
        self.write_header(message)?;
        if !message.content().is_empty() {
            writeln!(self.out, "{}", message.content())?;
        }
        if !message.attachments().is_empty() {
            let names: Vec<&str> = message.attachments().iter().map(|a| a.name.as_str()).collect();
            writeln!(self.out, "添付ファイル: {}", names.join(", "))?;
        }
        self.write_choices(message)?;
        writeln!(self.out)
    }

    /// Numbers options and related questions in one sequence, matching
    /// `ChatWidget::offered_labels`.
    fn write_choices(&mut self, message: &Message) -> io::Result<()> {
        let mut number = 0;
        for option in message.options() {
            number += 1;
            writeln!(self.out, "  [{number}] {option}")?;
        }
        if !message.related_questions().is_empty() {
            writeln!(self.out, "  関連する質問:")?;
            for question in message.related_questions() {
                number += 1;
                writeln!(self.out, "  [{number}] {question}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(events: &[WidgetEvent]) -> String {
        let mut renderer = TerminalRenderer::new(Vec::new(), false);
        for event in events {
            renderer.handle(event).unwrap();
        }
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn scripted_reply_prints_numbered_options() {
        let message = Message::assistant("選んでください").with_options(vec!["A".into(), "B".into()]);
        let out = render(&[WidgetEvent::MessageAppended { index: 0, message }]);
        assert!(out.contains("サポート:\n選んでください\n"));
        assert!(out.contains("  [1] A\n  [2] B\n"));
    }

    #[test]
    fn streamed_choices_wait_for_completion() {
        let placeholder = Message::assistant("")
            .with_options(vec!["次へ".into()])
            .with_related_questions(vec!["関連".into()]);
        let id = placeholder.id();
        let appended = WidgetEvent::MessageAppended { index: 1, message: placeholder };
        let extended = WidgetEvent::MessageExtended { index: 1, id, delta: 'は' };

        let partial = render(&[appended.clone(), extended.clone()]);
        assert!(partial.ends_with("は"));
        assert!(!partial.contains("次へ"));

        let done = render(&[appended, extended, WidgetEvent::StreamCompleted { index: 1, id }]);
        assert!(done.contains("は\n  [1] 次へ\n  関連する質問:\n  [2] 関連\n"));
    }

    #[test]
    fn user_attachments_are_listed() {
        use support_chat::domain::attachment::Attachment;
        use support_chat::domain::foundation::BlobId;

        let attachment = Attachment {
            name: "a.png".into(),
            mime_type: "image/png".into(),
            size: 1,
            blob: BlobId::new(),
        };
        let message = Message::user("見てください", vec![attachment]);
        let out = render(&[WidgetEvent::MessageAppended { index: 1, message }]);
        assert!(out.contains("お客様:\n見てください\n添付ファイル: a.png\n"));
    }

    #[test]
    fn countdown_is_throttled() {
        let out = render(&[
            WidgetEvent::EscalationTick { remaining_seconds: 29 },
            WidgetEvent::EscalationTick { remaining_seconds: 20 },
            WidgetEvent::EscalationTick { remaining_seconds: 2 },
        ]);
        assert!(!out.contains("29"));
        assert!(out.contains("残り 20 秒"));
        assert!(out.contains("残り 2 秒"));
    }
}
