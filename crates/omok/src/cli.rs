//! Command-line interface for omok.

use clap::{Parser, Subcommand};
use omok::{GameMode, ModelSelection, Stone};
use std::path::PathBuf;

/// Omok - five in a row against a friend or a language model
#[derive(Parser, Debug)]
#[command(name = "omok")]
#[command(about = "Omok (gomoku) with an optional LLM opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the TOML config file
        #[arg(short, long, default_value = "omok.toml")]
        config: PathBuf,

        /// Game mode: pvp or pve
        #[arg(short, long)]
        mode: Option<GameMode>,

        /// Model identifier, e.g. openai/gpt-4o-mini (see `omok models`)
        #[arg(long)]
        model: Option<ModelSelection>,

        /// Board side length
        #[arg(short, long)]
        size: Option<usize>,

        /// Color the AI plays in pve mode
        #[arg(long)]
        ai_color: Option<Stone>,

        /// Log file (the terminal is taken by the board)
        #[arg(long, default_value = "omok.log")]
        log_file: PathBuf,
    },

    /// List recognized model identifiers
    Models,
}
