use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use geocanvas::consts::AUTO_ROTATE_INTERVAL_MS;
use geotutor::config::{DEFAULT_STORE_DIR, HostConfig};
use geotutor::inspect;
use geotutor::session::{self, ReplayError, ScriptEvent, Session};
use geotutor::store::{DocumentStore, FileStore, StoreError};
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum HostError {
    #[error(transparent)]
    Config(#[from] geotutor::config::ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("no document stored under `{0}`")]
    MissingDocument(String),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "geotutor", about = "Geometry canvas host: replay, inspect and rotate stored figures")]
struct Cli {
    #[arg(long, global = true, env = "GEOTUTOR_STORE_DIR", default_value = DEFAULT_STORE_DIR)]
    store_dir: PathBuf,

    #[arg(long, global = true, env = "GEOTUTOR_VIEWPORT_WIDTH", default_value_t = 800.0)]
    viewport_width: f64,

    #[arg(long, global = true, env = "GEOTUTOR_VIEWPORT_HEIGHT", default_value_t = 600.0)]
    viewport_height: f64,

    /// Log phrases the canvas asks to speak.
    #[arg(long, global = true, env = "GEOTUTOR_NARRATION")]
    narration: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a JSON script of input events to the canvas and persist its edits.
    Replay { key: String, script: PathBuf },
    /// Print the view transform and projected points as JSON.
    Inspect { key: String },
    /// Run the auto-rotation timer and print the final view.
    Rotate {
        key: String,
        #[arg(long, default_value_t = 90)]
        ticks: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "geotutor failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), HostError> {
    let config = HostConfig::new(cli.store_dir, cli.viewport_width, cli.viewport_height, cli.narration)?;
    let store = Arc::new(FileStore::new(config.store_dir.clone()));
    info!(store_dir = %store.dir().display(), width = config.viewport.width, height = config.viewport.height, "host configured");

    match cli.command {
        Command::Replay { key, script } => run_replay(store, &key, &script, &config).await,
        Command::Inspect { key } => run_inspect(store.as_ref(), &key, &config).await,
        Command::Rotate { key, ticks } => run_rotate(store.as_ref(), &key, ticks, &config).await,
    }
}

async fn run_replay(store: Arc<FileStore>, key: &str, script: &Path, config: &HostConfig) -> Result<(), HostError> {
    let events = session::load_script(script).await?;
    let summary = session::replay(store, key, &events, config).await?;
    println!(
        "{} events, {} updates, {} saved, {} coalesced, {} failed",
        summary.events, summary.updates, summary.persist.saved, summary.persist.coalesced, summary.persist.failed
    );
    Ok(())
}

async fn load_session(store: &FileStore, key: &str, config: &HostConfig) -> Result<Session, HostError> {
    let doc = store.load(key).await?.ok_or_else(|| HostError::MissingDocument(key.to_owned()))?;
    let mut session = Session::new(config.viewport, config.narration);
    session.load(Some(doc));
    Ok(session)
}

async fn run_inspect(store: &FileStore, key: &str, config: &HostConfig) -> Result<(), HostError> {
    let session = load_session(store, key, config).await?;
    println!("{}", serde_json::to_string_pretty(&inspect::snapshot(session.core()))?);
    Ok(())
}

async fn run_rotate(store: &FileStore, key: &str, ticks: u32, config: &HostConfig) -> Result<(), HostError> {
    let mut session = load_session(store, key, config).await?;
    session.apply(&ScriptEvent::ToggleAutoRotate);
    if !session.core().is_auto_rotating() {
        info!(key, "document is not 3D; nothing to rotate");
    }

    let mut interval = tokio::time::interval(Duration::from_millis(AUTO_ROTATE_INTERVAL_MS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    for _ in 0..ticks {
        interval.tick().await;
        session.apply(&ScriptEvent::Tick { count: 1 });
    }

    println!("{}", serde_json::to_string_pretty(&inspect::snapshot(session.core()).view)?);
    Ok(())
}
