//! patchdeck - terminal reviewer for code-improvement results
//!
//! Sends an instruction for a repository to the improvement backend, shows
//! the returned plan, changes, tests and per-file diffs, and commits the
//! change set on request.

use anyhow::{Context, Result};
use clap::Parser;
use patchdeck::api::{Backend, HttpBackend};
use patchdeck::config::{Config, SERVER_ENV};
use patchdeck::ui::App;
use patchdeck::{app, logging};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "patchdeck",
    about = "Review and commit code-improvement results in the terminal",
    version
)]
struct Args {
    /// Backend address (overrides PATCHDECK_SERVER and the config file)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Repository path to pre-fill in the form
    #[arg(long, value_name = "PATH")]
    repo: Option<String>,

    /// Improvement instruction; with --repo it is submitted on startup
    #[arg(long, value_name = "TEXT")]
    prompt: Option<String>,

    /// Alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the change sets the backend still holds and exit
    #[arg(long)]
    pending: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    match logging::init(&config) {
        Ok(Some(path)) => info!(log = %path.display(), "logging initialised"),
        Ok(None) => {}
        Err(e) => eprintln!("  Warning: logging disabled: {:#}", e),
    }

    let env_server = std::env::var(SERVER_ENV).ok();
    let server_url = config.resolve_server_url(args.server.as_deref(), env_server.as_deref());
    let backend = HttpBackend::new(&server_url, config.request_timeout())
        .with_context(|| format!("Invalid backend address '{}'", server_url))?;
    info!(server = %backend.base_url(), "backend configured");

    if args.pending {
        return list_pending(&backend).await;
    }

    let repo = args.repo.as_deref().or(config.default_repo_path.as_deref());
    let mut ui_app = App::new(&server_url, repo);
    if let Some(prompt) = &args.prompt {
        ui_app.form.prompt = prompt.clone();
    }
    let submit_on_start = args.repo.is_some() && args.prompt.is_some();

    app::run_tui(ui_app, Arc::new(backend), submit_on_start).await
}

/// Print one line per pending change set
async fn list_pending(backend: &dyn Backend) -> Result<()> {
    let pending = backend
        .pending_changes()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    if pending.is_empty() {
        println!("No pending changes");
        return Ok(());
    }
    for change in pending {
        let status = if change.test_success { "pass" } else { "fail" };
        println!(
            "{}  [{}]  {}  {}{}",
            change.change_id,
            status,
            change.repo_path,
            change.requirement,
            change
                .branch_name
                .map(|b| format!("  ({})", b))
                .unwrap_or_default()
        );
    }
    Ok(())
}
