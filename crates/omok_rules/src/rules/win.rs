//! Win detection.
//!
//! A win is five or more contiguous same-colored stones along one of the
//! four axes. Overlines (six or more) win too, for either color.

use crate::{Board, Position, RulesError, Square};
use tracing::{instrument, trace};

/// Minimum run that wins.
pub const WIN_LENGTH: usize = 5;

/// The four axes as (row step, col step): horizontal, vertical,
/// diagonal ↘, diagonal ↗.
pub const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Counts the contiguous run through `pos` along `axis`, including `pos`.
///
/// Scans at most `WIN_LENGTH - 1` cells in each direction, stopping at the
/// first off-board or differently-colored cell, so the result saturates at
/// `2 * WIN_LENGTH - 1`. An empty origin yields 0.
pub fn run_length(board: &Board, pos: Position, axis: (isize, isize)) -> usize {
    let Some(Square::Occupied(stone)) = board.square(pos) else {
        return 0;
    };
    let (d_row, d_col) = axis;
    let extend = |sign: isize| {
        (1..WIN_LENGTH as isize)
            .map(|step| pos.offset(d_row * sign, d_col * sign, step))
            .take_while(|next: &Option<Position>| {
                (*next).and_then(|p| board.square(p)) == Some(Square::Occupied(stone))
            })
            .count()
    };
    1 + extend(1) + extend(-1)
}

/// Returns true iff the stone at `pos` is part of a line of five or more.
///
/// Pure query. An empty cell never wins.
///
/// # Errors
///
/// Returns an out-of-bounds [`RulesError`] if `pos` is off the board.
#[instrument(skip(board))]
pub fn check_win(board: &Board, pos: Position) -> Result<bool, RulesError> {
    if board.get(pos)? == Square::Empty {
        return Ok(false);
    }
    let won = AXES.iter().any(|&axis| {
        let run = run_length(board, pos, axis);
        trace!(?axis, run, "Scanned axis");
        run >= WIN_LENGTH
    });
    Ok(won)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stone;

    fn board_with(stones: &[(usize, usize, Stone)]) -> Board {
        let mut board = Board::new(15);
        for &(row, col, stone) in stones {
            board.place(Position::new(row, col), stone).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_cell_never_wins() {
        let board = Board::new(15);
        assert!(!check_win(&board, Position::new(7, 7)).unwrap());
    }

    #[test]
    fn test_four_is_not_enough() {
        let board = board_with(&[
            (3, 3, Stone::Black),
            (3, 4, Stone::Black),
            (3, 5, Stone::Black),
            (3, 6, Stone::Black),
        ]);
        assert!(!check_win(&board, Position::new(3, 6)).unwrap());
    }

    #[test]
    fn test_horizontal_five() {
        let stones: Vec<_> = (0..5).map(|c| (3, c, Stone::Black)).collect();
        let board = board_with(&stones);
        for c in 0..5 {
            assert!(check_win(&board, Position::new(3, c)).unwrap());
        }
    }

    #[test]
    fn test_vertical_five() {
        let stones: Vec<_> = (10..15).map(|r| (r, 0, Stone::White)).collect();
        let board = board_with(&stones);
        assert!(check_win(&board, Position::new(14, 0)).unwrap());
    }

    #[test]
    fn test_diagonal_down_right() {
        let stones: Vec<_> = (0..5).map(|i| (i + 2, i + 4, Stone::White)).collect();
        let board = board_with(&stones);
        assert!(check_win(&board, Position::new(4, 6)).unwrap());
    }

    #[test]
    fn test_diagonal_up_right() {
        let stones: Vec<_> = (0..5).map(|i| (10 - i, i, Stone::Black)).collect();
        let board = board_with(&stones);
        assert!(check_win(&board, Position::new(10, 0)).unwrap());
        assert!(check_win(&board, Position::new(6, 4)).unwrap());
    }

    #[test]
    fn test_overline_wins() {
        let stones: Vec<_> = (2..8).map(|c| (9, c, Stone::Black)).collect();
        let board = board_with(&stones);
        assert!(check_win(&board, Position::new(9, 4)).unwrap());
        assert_eq!(run_length(&board, Position::new(9, 4), (0, 1)), 6);
    }

    #[test]
    fn test_opponent_stone_breaks_run() {
        let board = board_with(&[
            (0, 0, Stone::Black),
            (0, 1, Stone::Black),
            (0, 2, Stone::White),
            (0, 3, Stone::Black),
            (0, 4, Stone::Black),
            (0, 5, Stone::Black),
        ]);
        assert!(!check_win(&board, Position::new(0, 3)).unwrap());
        assert_eq!(run_length(&board, Position::new(0, 1), (0, 1)), 2);
    }

    #[test]
    fn test_out_of_bounds_is_error() {
        let board = Board::new(15);
        assert!(check_win(&board, Position::new(0, 15)).is_err());
    }
}
