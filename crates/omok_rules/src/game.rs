//! Game state and the placement operation.

use super::board::{Board, DEFAULT_BOARD_SIZE};
use super::error::RulesError;
use super::position::Position;
use super::rules;
use super::types::{Square, Stone};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// A player completed a line of five or more.
    Won {
        /// Winning color.
        winner: Stone,
        /// The placement that completed the line.
        at: Position,
    },
    /// Board filled up without a winner.
    Draw,
}

/// Complete game state: board, side to move, and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_turn: Stone,
    status: GameStatus,
    /// Positions played, in order.
    history: Vec<Position>,
}

impl GameState {
    /// Creates a fresh state: empty board, black to move.
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            current_turn: Stone::Black,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color permitted to place the next stone.
    pub fn current_turn(&self) -> Stone {
        self.current_turn
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether the game has ended. No placements are accepted once true.
    pub fn game_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Returns the most recent placement.
    pub fn last_move(&self) -> Option<Position> {
        self.history.last().copied()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

/// Outcome of [`Game::place_stone`].
///
/// Maps onto the `(is_terminal, message)` pair callers render: the message
/// is absent only for [`Placement::Rejected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Nothing happened: placement gated off, cell occupied, or game over.
    Rejected,
    /// Stone placed, play passes to `next_turn`.
    Continue {
        /// Color to move next.
        next_turn: Stone,
    },
    /// Stone placed and completed a winning line.
    Won {
        /// Winning color.
        winner: Stone,
        /// Where the winning stone went.
        at: Position,
    },
    /// Stone placed on the last empty cell without a win.
    Draw,
}

impl Placement {
    /// Whether the game ended with this placement.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Placement::Won { .. } | Placement::Draw)
    }

    /// Whether a stone was written to the board.
    pub fn is_placed(&self) -> bool {
        !matches!(self, Placement::Rejected)
    }

    /// Status message for the render layer, absent on the no-op path.
    pub fn message(&self) -> Option<String> {
        match self {
            Placement::Rejected => None,
            Placement::Continue { next_turn } => Some(format!("Turn: {}", next_turn)),
            Placement::Won { winner, at } => Some(format!("{} wins! (at {})", winner, at)),
            Placement::Draw => Some("Draw! Board is full.".to_string()),
        }
    }
}

/// Omok rules engine. Owns the [`GameState`] and is its only writer.
#[derive(Debug, Clone, Default)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game on a `size × size` board.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            state: GameState::new(size),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Discards the current game and starts over on an empty board.
    #[instrument(skip(self))]
    pub fn reset(&mut self, size: usize) {
        info!(size, "Resetting game");
        self.state = GameState::new(size);
    }

    /// Attempts to place a stone of the current turn's color at `pos`.
    ///
    /// `available` is the caller's gate: when false the call is a no-op.
    /// Occupied cells and finished games are no-ops too. None of those are
    /// errors; they come back as [`Placement::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds [`RulesError`] if `pos` is off the board.
    #[instrument(skip(self), fields(turn = %self.state.current_turn))]
    pub fn place_stone(&mut self, pos: Position, available: bool) -> Result<Placement, RulesError> {
        let square = self.state.board.get(pos)?;
        if !available || square != Square::Empty || self.state.game_over() {
            debug!(?square, game_over = self.state.game_over(), "Placement rejected");
            return Ok(Placement::Rejected);
        }

        let stone = self.state.current_turn;
        self.state.board.place(pos, stone)?;
        self.state.history.push(pos);

        if rules::check_win(&self.state.board, pos)? {
            info!(winner = %stone, at = %pos, "Game won");
            self.state.status = GameStatus::Won { winner: stone, at: pos };
            return Ok(Placement::Won { winner: stone, at: pos });
        }

        if rules::is_full(&self.state.board) {
            info!("Board full, game drawn");
            self.state.status = GameStatus::Draw;
            return Ok(Placement::Draw);
        }

        self.state.current_turn = stone.opponent();
        debug!(next_turn = %self.state.current_turn, "Stone placed");
        Ok(Placement::Continue {
            next_turn: self.state.current_turn,
        })
    }

    /// Whether the stone at `pos` is part of a line of five or more.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds [`RulesError`] if `pos` is off the board.
    pub fn check_win(&self, pos: Position) -> Result<bool, RulesError> {
        rules::check_win(&self.state.board, pos)
    }
}
