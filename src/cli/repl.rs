//! Interactive terminal session around one widget.

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use super::command::{Command, HELP};
use super::prompts;
use super::renderer::{supports_color, TerminalRenderer, CYAN, YELLOW};
use support_chat::application::{ChatWidget, DispatchOutcome, WidgetError};
use support_chat::domain::foundation::Timestamp;

/// Terminal input, shared by the survey, the chat loop and the evaluation.
pub type Input = Lines<BufReader<Stdin>>;

pub fn stdin_lines() -> Input {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Runs until `/quit` or end of input, then asks for an evaluation and
/// tears the widget down.
pub async fn run(widget: Arc<ChatWidget>, mut lines: Input) -> Result<()> {
    let color = supports_color();
    let mut notices = TerminalRenderer::new(io::stdout(), color);

    notices.note(CYAN, &format!("== {} ==", widget.config().title))?;
    let renderer = spawn_renderer(&widget, color).await?;
    notices.note(CYAN, "/help でコマンド一覧を表示します。")?;

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(error) => {
                notices.note(YELLOW, &error.to_string())?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Text(text) => spawn_dispatch(&widget, Dispatch::Text(text)),
            Command::Select(number) => {
                let offered = widget.offered_labels().await;
                match offered.get(number - 1) {
                    Some(label) => spawn_dispatch(&widget, Dispatch::Option(label.clone())),
                    None => notices.note(YELLOW, &format!("選択肢 {number} はありません"))?,
                }
            }
            Command::Attach(path) => {
                if let Err(error) = attach(&widget, &path).await {
                    notices.note(YELLOW, &error.to_string())?;
                }
            }
            Command::Detach(number) => match widget.remove_attachment(number - 1).await {
                Ok(removed) => notices.note(CYAN, &format!("{} を取り消しました", removed.name))?,
                Err(error) => notices.note(YELLOW, &error.to_string())?,
            },
            Command::Download(path) => match download(&widget, path.as_deref()).await {
                Ok(written) => notices.note(CYAN, &format!("会話履歴を {written} に保存しました"))?,
                Err(error) => notices.note(YELLOW, &error.to_string())?,
            },
        }
    }

    prompts::evaluation(widget.evaluation(), &mut lines).await?;
    widget.shutdown().await;
    renderer.abort();
    Ok(())
}

/// Prints the transcript so far, then follows the event stream.
async fn spawn_renderer(widget: &ChatWidget, color: bool) -> io::Result<JoinHandle<()>> {
    let mut events = widget.subscribe();
    let mut renderer = TerminalRenderer::new(io::stdout(), color);
    renderer.render_transcript(&widget.transcript().await)?;

    Ok(tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Err(error) = renderer.handle(&event) {
                        tracing::warn!(error = %error, "Terminal write failed");
                        return;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Renderer fell behind; events dropped");
                }
                Err(RecvError::Closed) => return,
            }
        }
    }))
}

enum Dispatch {
    Text(String),
    Option(String),
}

/// Dispatches on its own task so input stays responsive while a reply is
/// composed; a second send meanwhile is answered with `Busy`.
fn spawn_dispatch(widget: &Arc<ChatWidget>, dispatch: Dispatch) {
    let widget = Arc::clone(widget);
    tokio::spawn(async move {
        let result = match &dispatch {
            Dispatch::Text(text) => widget.send_text(text).await,
            Dispatch::Option(label) => widget.select_option(label).await,
        };
        match result {
            Ok(DispatchOutcome::Failed { .. }) => {
                tracing::debug!("Reply failed; apology shown");
            }
            Ok(_) => {}
            Err(WidgetError::EmptyInput) => {}
            Err(WidgetError::InputDisabled) => println!("番号で選択してください。"),
            Err(error) => println!("{error}"),
        }
    });
}

async fn attach(widget: &ChatWidget, path: &Path) -> Result<()> {
    let bytes = tokio::fs::read(path).await?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    widget.stage_attachment(&name, mime.essence_str(), bytes).await?;
    Ok(())
}

async fn download(widget: &ChatWidget, path: Option<&Path>) -> Result<String> {
    let now = Timestamp::now();
    let text = widget.export_transcript(now).await?;
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => ChatWidget::export_file_name(now).into(),
    };
    tokio::fs::write(&target, text).await?;
    Ok(target.display().to_string())
}
