//! Square omok board.

use super::error::RulesError;
use super::position::Position;
use super::types::{Square, Stone};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Standard omok board side length.
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// An `size × size` grid of squares.
///
/// Cells only ever move from empty to occupied; there are no captures or
/// takebacks, so the board offers no way to clear a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Squares in row-major order.
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty board.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `pos` lies on the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Gets the square at `pos`.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds [`RulesError`] if `pos` is off the board.
    #[track_caller]
    pub fn get(&self, pos: Position) -> Result<Square, RulesError> {
        self.index(pos)
            .map(|idx| self.squares[idx])
            .ok_or_else(|| RulesError::out_of_bounds(pos.row, pos.col, self.size))
    }

    /// Gets the square at `pos`, treating off-board cells as absent.
    pub fn square(&self, pos: Position) -> Option<Square> {
        self.index(pos).map(|idx| self.squares[idx])
    }

    /// Checks if a square is on the board and empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.square(pos), Some(Square::Empty))
    }

    /// Places a stone. The caller has already checked the cell is empty.
    #[track_caller]
    pub(crate) fn place(&mut self, pos: Position, stone: Stone) -> Result<(), RulesError> {
        let idx = self
            .index(pos)
            .ok_or_else(|| RulesError::out_of_bounds(pos.row, pos.col, self.size))?;
        self.squares[idx] = Square::Occupied(stone);
        Ok(())
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Iterates over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
        // chunks(0) panics, and a zero-sized board has no rows anyway
        self.squares.chunks(self.size.max(1))
    }

    /// All empty cells in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions().filter(|pos| self.is_empty(*pos)).collect()
    }

    /// Number of stones on the board.
    pub fn stone_count(&self) -> usize {
        self.squares.iter().filter(|sq| **sq != Square::Empty).count()
    }

    /// Encodes the board as rows of black = 1, white = -1, empty = 0.
    ///
    /// This is the wire contract with move oracles; keep it stable.
    pub fn to_wire_matrix(&self) -> Vec<Vec<i8>> {
        self.rows()
            .map(|row| row.iter().map(|sq| sq.wire_value()).collect())
            .collect()
    }

    /// Formats the board as text: `B` black, `W` white, `.` empty.
    pub fn display(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|sq| match sq {
                        Square::Empty => '.',
                        Square::Occupied(Stone::Black) => 'B',
                        Square::Occupied(Stone::White) => 'W',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.size + pos.col)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}
