use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use vocably_ai::{GeminiClient, InsightProvider};
use vocably_config::{Config, paths};
use vocably_instance::{ClaimOutcome, Command, InstanceEndpoint, claim, send_command};
use vocably_store::VocabularyStore;

mod controller;
mod events;
mod io;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "vocably", version, about = "Vocabulary learning tray app")]
struct Args {
    /// Override the data directory (database, config, pid file, socket)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

/// One-shot commands for a running instance; this is what the hotkey
/// helper script calls.
#[derive(Subcommand)]
enum CliCommand {
    /// Ask the running instance to show its window
    Show,
    /// Ask the running instance to hide its window
    Hide,
    /// Ask the running instance to quit
    Quit,
}

struct AppPaths {
    config: PathBuf,
    db: PathBuf,
    endpoint: InstanceEndpoint,
}

impl AppPaths {
    fn resolve(data_dir: Option<PathBuf>) -> Self {
        match data_dir {
            Some(dir) => Self {
                config: dir.join("config.json"),
                db: dir.join("vocabulary.db"),
                endpoint: InstanceEndpoint {
                    socket: dir.join("vocably.sock"),
                    pid_file: dir.join("vocably.pid"),
                },
            },
            None => Self {
                config: paths::config_path(),
                db: paths::db_path(),
                endpoint: InstanceEndpoint {
                    socket: paths::socket_path(),
                    pid_file: paths::pid_path(),
                },
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let paths = AppPaths::resolve(args.data_dir);

    if let Some(command) = args.command {
        return send_one_shot(&paths, command).await;
    }

    match run(paths).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn send_one_shot(paths: &AppPaths, command: CliCommand) -> ExitCode {
    let command = match command {
        CliCommand::Show => Command::ShowWindow,
        CliCommand::Hide => Command::HideWindow,
        CliCommand::Quit => Command::Quit,
    };

    match send_command(&paths.endpoint.socket, command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            tracing::warn!("running instance refused the request");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("no running instance: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(paths: AppPaths) -> anyhow::Result<()> {
    let config = Config::load_or_default(&paths.config);
    let state = Arc::new(AppState::new(config));

    // Claim the single-instance identity before building anything
    // heavier; a secondary just defers and exits.
    let (commands_tx, commands_rx) = kanal::bounded_async(16);
    let mut guard = match claim(&paths.endpoint, commands_tx).await {
        ClaimOutcome::Secondary => {
            tracing::info!("another instance is running, deferring to it");
            return Ok(());
        }
        ClaimOutcome::Primary(guard) => guard,
    };

    let store = VocabularyStore::open(&paths.db)?;
    store.initialize();

    let provider: Option<Arc<dyn InsightProvider>> = {
        let config = state.config.read().await;
        match config.ai.api_key() {
            Some(key) => Some(Arc::new(GeminiClient::new(
                key,
                config.ai.model.clone(),
                config.ai.temperature,
            ))),
            None => {
                tracing::warn!("no Gemini API key configured, AI lookup disabled");
                None
            }
        }
    };

    let controller = AppController::new(Arc::clone(&state));
    let mut tasks = controller.spawn_tasks(store, provider, commands_rx);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task finished, shutting down"),
                Some(Ok(Err(e))) => tracing::error!("task exited: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    // PID marker and socket must go away on every exit path; the
    // guard's Drop also covers panics above this point.
    guard.release();
    Ok(())
}
