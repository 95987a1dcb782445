//! simplenotes: terminal client for a SimpleNotes server.
//!
//! One-shot commands (`list`, `add`, `delete`, `health`) and an interactive
//! `shell` over the same view controller.

mod render;
mod shell;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simplenotes_client::{ClientConfig, HttpNoteStore};
use simplenotes_core::{NoteId, NoteStore, NoteTag};
use simplenotes_view::{NotesController, SortOrder, TagFilter};

use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "simplenotes")]
#[command(author, version, about = "Take, search and tag notes on a SimpleNotes server")]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Server root URL (overrides SIMPLENOTES_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides SIMPLENOTES_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, newest first
    List {
        /// Only notes whose title or content contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only notes with this tag (all, work, personal, ideas, reminders)
        #[arg(short, long, default_value = "all")]
        tag: TagFilter,

        /// Order by note date instead of fetch order
        #[arg(long)]
        by_date: bool,
    },

    /// Add a note
    Add {
        #[arg(short = 'T', long)]
        title: String,

        #[arg(short, long)]
        content: String,

        /// work, personal, ideas or reminders
        #[arg(short, long, default_value = "ideas")]
        tag: NoteTag,
    },

    /// Delete a note by id
    Delete {
        id: NoteId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive session
    Shell,

    /// Check whether the server is reachable
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = init_tracing();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Info for the workspace crates, warn for dependencies.
const DEFAULT_LOG_FILTER: &str =
    "simplenotes_cli=info,simplenotes_client=info,simplenotes_view=info,simplenotes_core=info,warn";

/// Tracing setup, configured by environment:
///
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, daily rotation)
///   LOG_ANSI    - "true"/"false" override ANSI colors
///   RUST_LOG    - env filter (default: [`DEFAULT_LOG_FILTER`])
///
/// Console logs go to stderr so command output stays clean.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("simplenotes.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );
    guard
}

fn build_store(args: &ConnectionArgs) -> anyhow::Result<HttpNoteStore> {
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout) = args.timeout_secs {
        config = config.with_timeout_seconds(timeout);
    }
    HttpNoteStore::new(config).context("Invalid client configuration")
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let store = build_store(&cli.connection)?;

    match cli.command {
        Commands::List {
            search,
            tag,
            by_date,
        } => cmd_list(store, search, tag, by_date).await,
        Commands::Add {
            title,
            content,
            tag,
        } => cmd_add(store, title, content, tag).await,
        Commands::Delete { id, yes } => cmd_delete(store, id, yes).await,
        Commands::Shell => cmd_shell(store).await,
        Commands::Health => cmd_health(store).await,
    }
}

async fn cmd_list(
    store: HttpNoteStore,
    search: Option<String>,
    tag: TagFilter,
    by_date: bool,
) -> anyhow::Result<ExitCode> {
    let mut controller = NotesController::new(store);
    controller.refresh().await.context("Could not load notes")?;

    if let Some(search) = search {
        controller.set_search_text(search);
    }
    controller.set_tag_filter(tag);
    if by_date {
        controller.set_sort_order(SortOrder::DateDescending);
    }

    print!("{}", render::render_list(&controller.visible(), &Local));
    Ok(ExitCode::SUCCESS)
}

async fn cmd_add(
    store: HttpNoteStore,
    title: String,
    content: String,
    tag: NoteTag,
) -> anyhow::Result<ExitCode> {
    let mut controller = NotesController::new(store);
    controller.open_compose()?;
    {
        let draft = controller.draft_mut();
        draft.title = title;
        draft.content = content;
        draft.tag = tag;
    }
    controller.submit_draft().await.context("Could not save note")?;

    print_status(&controller);
    Ok(ExitCode::SUCCESS)
}

async fn cmd_delete(store: HttpNoteStore, id: NoteId, yes: bool) -> anyhow::Result<ExitCode> {
    let mut controller = NotesController::new(store);
    controller.request_delete(id.clone())?;

    if !yes && !confirm(&format!("{} [{}]", render::DELETE_QUESTION, id)).await? {
        controller.cancel_delete();
        println!("Cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    controller
        .confirm_delete()
        .await
        .with_context(|| format!("Could not delete note {}", id))?;

    print_status(&controller);
    Ok(ExitCode::SUCCESS)
}

async fn cmd_shell(store: HttpNoteStore) -> anyhow::Result<ExitCode> {
    info!(base_url = %store.config().base_url, "Starting shell");
    let controller = NotesController::new(store);
    let mut shell = Shell::new(controller, std::io::stdout());
    println!("Type help for commands.");
    shell.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(ExitCode::SUCCESS)
}

async fn cmd_health(store: HttpNoteStore) -> anyhow::Result<ExitCode> {
    let url = store.notes_url().to_string();
    if store.health_check().await {
        println!("{} is reachable", url);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} is not reachable", url);
        Ok(ExitCode::FAILURE)
    }
}

fn print_status<S: NoteStore>(controller: &NotesController<S>) {
    if let Some(status) = render::render_status(controller.status()) {
        println!("{}", status);
    }
}

async fn confirm(question: &str) -> anyhow::Result<bool> {
    use std::io::Write;

    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
