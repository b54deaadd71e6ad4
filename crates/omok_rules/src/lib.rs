//! Pure omok (gomoku) rules engine.
//!
//! Owns the board, the side to move and the game-over flag. Everything
//! here is synchronous and free of I/O: callers feed placements in and
//! read [`Placement`] signals back out.
//!
//! # Example
//!
//! ```
//! use omok_rules::{Game, Position, Stone};
//!
//! let mut game = Game::new(15);
//! let placement = game.place_stone(Position::new(7, 7), true)?;
//! assert!(!placement.is_terminal());
//! assert_eq!(game.state().current_turn(), Stone::White);
//! # Ok::<(), omok_rules::RulesError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod game;
mod position;
pub mod rules;
mod types;

pub use board::{Board, DEFAULT_BOARD_SIZE};
pub use error::{RulesError, RulesErrorKind};
pub use game::{Game, GameState, GameStatus, Placement};
pub use position::Position;
pub use types::{Square, Stone};
