//! Omok - unified CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use omok::{
    ChannelSink, GameMode, LlmOracle, ModelSelection, MoveArbiter, OmokConfig, Stone, tui,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            mode,
            model,
            size,
            ai_color,
            log_file,
        } => {
            initialize_tracing(&log_file)?;
            let config = load_config(&config, mode, model, size, ai_color)?;
            run_play(config).await
        }
        Command::Models => {
            for model in ModelSelection::all() {
                println!("{}", model);
            }
            Ok(())
        }
    }
}

/// Runs a terminal game: arbiter on its own task, UI on this one.
#[instrument(skip_all, fields(mode = %config.mode(), model = %config.model()))]
async fn run_play(config: OmokConfig) -> Result<()> {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let arbiter = MoveArbiter::new(
        &config,
        Arc::new(LlmOracle::new(config.clone())),
        Box::new(ChannelSink::new(event_tx)),
    );
    let arbiter_task = tokio::spawn(arbiter.run(action_rx));

    let ui_result = tui::run_tui(action_tx, event_rx).await;

    // The UI dropped its sender, so the arbiter loop is winding down.
    arbiter_task.await?;
    info!("Game session ended");
    ui_result
}

#[instrument(skip(config_path))]
fn load_config(
    config_path: &Path,
    mode: Option<GameMode>,
    model: Option<ModelSelection>,
    size: Option<usize>,
    ai_color: Option<Stone>,
) -> Result<OmokConfig> {
    info!(path = %config_path.display(), "Loading configuration");

    let mut config = OmokConfig::load_or_default(config_path)?;

    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }
    if let Some(model) = model {
        config = config.with_model(model);
    }
    if let Some(size) = size {
        config = config.with_board_size(size)?;
    }
    if let Some(ai_color) = ai_color {
        config = config.with_ai_color(ai_color);
    }

    info!(?config, "Configuration ready");
    Ok(config)
}

/// Logs to a file so the terminal UI is not disturbed.
fn initialize_tracing(log_file: &PathBuf) -> Result<()> {
    let file = std::fs::File::create(log_file)?;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,omok=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .init();

    info!("Tracing initialized");
    Ok(())
}
