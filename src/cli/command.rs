//! Parsing of one line of terminal input.

use std::path::PathBuf;
use thiserror::Error;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick the n-th offered choice (1-based).
    Select(usize),
    /// Send typed text. May be empty when attachments are staged.
    Text(String),
    Attach(PathBuf),
    /// Unstage the n-th pending attachment (1-based).
    Detach(usize),
    Download(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("/{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("Unknown command /{0} (try /help)")]
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix('/') {
            let (name, arg) = match rest.split_once(char::is_whitespace) {
                Some((name, arg)) => (name, arg.trim()),
                None => (rest, ""),
            };
            return match name {
                "attach" if arg.is_empty() => Err(CommandError::MissingArgument("attach")),
                "attach" => Ok(Command::Attach(PathBuf::from(arg))),
                "detach" if arg.is_empty() => Err(CommandError::MissingArgument("detach")),
                "detach" => parse_position(arg).map(Command::Detach),
                "download" if arg.is_empty() => Ok(Command::Download(None)),
                "download" => Ok(Command::Download(Some(PathBuf::from(arg)))),
                "help" | "?" => Ok(Command::Help),
                "quit" | "exit" | "q" => Ok(Command::Quit),
                other => Err(CommandError::Unknown(other.to_string())),
            };
        }

        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return parse_position(trimmed).map(Command::Select);
        }

        Ok(Command::Text(trimmed.to_string()))
    }
}

fn parse_position(arg: &str) -> Result<usize, CommandError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidNumber(arg.to_string())),
    }
}

pub const HELP: &str = "\
番号            表示された選択肢を選ぶ
テキスト        質問を送信する
/attach <path>  ファイルを添付する
/detach <n>     n 番目の添付を取り消す
/download [path] 会話履歴を保存する
/quit           評価して終了する";
