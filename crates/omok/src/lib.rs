//! Omok against a language-model opponent.
//!
//! # Architecture
//!
//! - **Rules**: board, turns and win detection live in [`omok_rules`]
//! - **Arbiter**: [`MoveArbiter`] sequences human and oracle turns
//! - **Oracle**: [`MoveOracle`] proposes moves; [`LlmOracle`] asks OpenAI or Gemini
//! - **Sink**: [`RenderSink`] receives state snapshots and notices
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use omok::{ChannelSink, LlmOracle, MoveArbiter, OmokConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = OmokConfig::load_or_default("omok.toml")?;
//! let (event_tx, _event_rx) = tokio::sync::mpsc::unbounded_channel();
//! let (_action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel();
//!
//! let arbiter = MoveArbiter::new(
//!     &config,
//!     Arc::new(LlmOracle::new(config.clone())),
//!     Box::new(ChannelSink::new(event_tx)),
//! );
//! arbiter.run(action_rx).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arbiter;
mod config;
mod llm_client;
mod mode;
mod model;
mod oracle;
mod sink;
pub mod tui;

// Crate-level exports - Arbiter
pub use arbiter::{ArbiterPhase, MoveArbiter, OracleReply, RequestTag, UserAction};

// Crate-level exports - Configuration
pub use config::{ConfigError, MAX_BOARD_SIZE, MIN_BOARD_SIZE, OmokConfig};
pub use mode::GameMode;
pub use model::{LlmProvider, ModelSelection};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError};

// Crate-level exports - Oracles
pub use oracle::{BoardSnapshot, LlmOracle, MoveOracle, OracleError, OracleErrorKind, parse_move};

// Crate-level exports - Render sinks
pub use sink::{ChannelSink, GameEvent, Notice, RenderSink, StateSnapshot};

// Crate-level exports - Game types
pub use omok_rules::{Board, Game, GameState, GameStatus, Placement, Position, Square, Stone};
