//! Full-board detection.

use crate::{Board, Square};
use tracing::instrument;

/// Checks if every cell holds a stone.
///
/// A full board with no winner ends the game as a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Stone};

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new(5)));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(5);
        for row in 0..5 {
            for col in 0..5 {
                board.place(Position::new(row, col), Stone::Black).unwrap();
            }
        }
        assert!(is_full(&board));
    }
}
