mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use support_chat::adapters::{
    ApiClient, DemoResponder, HttpChatClient, HttpEvaluationClient, HttpSessionClient,
    LocalSessionService, LoggingEvaluationSubmitter,
};
use support_chat::application::{ChatWidget, WidgetDeps};
use support_chat::config::{AppConfig, LoggingConfig, Pane, Responder};

#[derive(Parser)]
#[command(name = "support-chat")]
#[command(about = "Customer-support chat widget in the terminal")]
#[command(version)]
struct Cli {
    /// Widget preset to mount
    #[arg(long, value_enum, default_value_t = PaneArg::Hybrid)]
    pane: PaneArg,

    /// Entry channel reported to the backend (e.g. "web", "line")
    #[arg(long)]
    source: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ask the pre-chat survey before the chat opens
    #[arg(long)]
    survey: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaneArg {
    Selection,
    Conversation,
    Hybrid,
}

impl From<PaneArg> for Pane {
    fn from(pane: PaneArg) -> Self {
        match pane {
            PaneArg::Selection => Pane::Selection,
            PaneArg::Conversation => Pane::Conversation,
            PaneArg::Hybrid => Pane::Hybrid,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(source) = cli.source {
        config.widget.source = source;
    }
    let config = config.with_pane(cli.pane.into());

    init_tracing(&config.logging);
    config.validate().context("Invalid configuration")?;

    let table = config
        .scenario
        .load_table()
        .context("Failed to load scenario table")?;
    info!(
        entries = table.len(),
        mode = ?config.widget.mode,
        responder = ?config.api.responder,
        "Mounting chat widget"
    );

    let mut lines = cli::repl::stdin_lines();
    let survey = if cli.survey {
        match cli::prompts::survey(&config.survey.form(), &mut lines).await? {
            Some(response) => Some(response),
            None => return Ok(()),
        }
    } else {
        None
    };

    let deps = build_deps(&config)?;
    let widget = match survey {
        Some(response) => ChatWidget::mount_after_survey(&config, table, deps, response).await,
        None => ChatWidget::mount(&config, table, deps).await,
    };
    cli::repl::run(Arc::new(widget), lines).await
}

/// Logs go to stderr so they never interleave with the chat on stdout.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_deps(config: &AppConfig) -> Result<WidgetDeps> {
    let deps = match config.api.responder {
        Responder::Mock => WidgetDeps {
            chat: Arc::new(DemoResponder::new(config.timing.mock_latency())),
            sessions: Arc::new(LocalSessionService::new()),
            evaluations: Arc::new(LoggingEvaluationSubmitter::new()),
        },
        Responder::Remote => {
            let api = ApiClient::from_config(&config.api).context("Failed to build HTTP client")?;
            info!(base_url = %config.api.base(), "Using remote support backend");
            WidgetDeps {
                chat: Arc::new(HttpChatClient::new(api.clone())),
                sessions: Arc::new(HttpSessionClient::new(api.clone())),
                evaluations: Arc::new(HttpEvaluationClient::new(api)),
            }
        }
    };
    Ok(deps)
}
