//! Integration tests for the omok rules engine.

use omok_rules::{Game, GameStatus, Placement, Position, Square, Stone, rules};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

fn play(game: &mut Game, moves: &[(usize, usize)]) -> Vec<Placement> {
    moves
        .iter()
        .map(|&(row, col)| game.place_stone(Position::new(row, col), true).unwrap())
        .collect()
}

#[test]
fn test_black_wins_horizontal_at_l8() {
    let mut game = Game::new(15);
    let placements = play(
        &mut game,
        &[
            (7, 7),
            (0, 0),
            (7, 8),
            (1, 1),
            (7, 9),
            (2, 2),
            (7, 10),
            (3, 3),
            (7, 11),
        ],
    );

    let (last, rest) = placements.split_last().unwrap();
    assert!(rest.iter().all(|p| !p.is_terminal()));
    assert!(last.is_terminal());
    let message = last.message().unwrap();
    assert!(message.contains("Black"), "message was {message}");
    assert!(message.contains("L8"), "message was {message}");
    assert_eq!(
        game.state().status(),
        GameStatus::Won {
            winner: Stone::Black,
            at: Position::new(7, 11)
        }
    );
}

#[test]
fn test_occupied_cell_is_silent_noop() {
    let mut game = Game::new(15);
    play(&mut game, &[(7, 7)]);
    let before = game.state().clone();

    let placement = game.place_stone(Position::new(7, 7), true).unwrap();

    assert_eq!(placement, Placement::Rejected);
    assert!(!placement.is_terminal());
    assert_eq!(placement.message(), None);
    assert_eq!(game.state(), &before);
}

#[test]
fn test_turn_alternates_strictly() {
    let mut game = Game::new(15);
    for (row, col) in [(0, 0), (5, 5), (0, 2), (5, 7), (10, 10), (14, 0)] {
        let before = game.state().current_turn();
        let placement = game.place_stone(Position::new(row, col), true).unwrap();
        assert!(!placement.is_terminal());
        assert_ne!(game.state().current_turn(), before);
    }
}

#[test]
fn test_no_placement_after_game_over() {
    let mut game = Game::new(15);
    play(
        &mut game,
        &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2), (0, 3), (1, 3), (0, 4)],
    );
    assert!(game.state().game_over());
    let board = game.state().board().clone();
    let turn = game.state().current_turn();

    for pos in board.empty_positions().into_iter().take(20) {
        assert_eq!(game.place_stone(pos, true).unwrap(), Placement::Rejected);
    }
    assert_eq!(game.state().board(), &board);
    assert_eq!(game.state().current_turn(), turn);
}

#[test]
fn test_reset_yields_empty_board() {
    let mut game = Game::new(15);
    play(&mut game, &[(7, 7), (7, 8), (8, 8)]);
    game.reset(15);

    assert!(game.state().board().squares().iter().all(|s| *s == Square::Empty));
    assert_eq!(game.state().current_turn(), Stone::Black);
    assert!(!game.state().game_over());
    assert!(game.state().history().is_empty());
}

#[test]
fn test_white_can_win() {
    let mut game = Game::new(15);
    let placements = play(
        &mut game,
        &[
            (0, 0),
            (10, 4),
            (0, 2),
            (9, 5),
            (0, 4),
            (8, 6),
            (0, 6),
            (7, 7),
            (0, 8),
            (6, 8),
        ],
    );
    assert_eq!(
        placements.last(),
        Some(&Placement::Won {
            winner: Stone::White,
            at: Position::new(6, 8)
        })
    );
    assert_eq!(
        placements.last().unwrap().message().as_deref(),
        Some("White wins! (at I7)")
    );
}

/// Longest same-color run through `pos` along `axis`, scanning the whole board.
fn full_run(board: &omok_rules::Board, pos: Position, axis: (isize, isize)) -> usize {
    let Some(Square::Occupied(stone)) = board.square(pos) else {
        return 0;
    };
    let mut count = 1;
    for sign in [1isize, -1] {
        let (mut row, mut col) = (pos.row as isize, pos.col as isize);
        loop {
            row += axis.0 * sign;
            col += axis.1 * sign;
            if row < 0 || col < 0 {
                break;
            }
            match board.square(Position::new(row as usize, col as usize)) {
                Some(Square::Occupied(s)) if s == stone => count += 1,
                _ => break,
            }
        }
    }
    count
}

#[test]
fn test_check_win_matches_exhaustive_scan() {
    // Seeded random boards, dense enough to produce wins.
    let mut rng = StdRng::seed_from_u64(0x5eed_cafe);

    for _ in 0..50 {
        let mut game = Game::new(9);
        // Fill via the engine so the board stays legal; stop at the first win.
        for _ in 0..60 {
            if game.state().game_over() {
                break;
            }
            let empties = game.state().board().empty_positions();
            let Some(&pos) = empties.choose(&mut rng) else {
                break;
            };
            game.place_stone(pos, true).unwrap();
        }

        let board = game.state().board();
        for row in 0..9 {
            for col in 0..9 {
                let pos = Position::new(row, col);
                let expected = rules::AXES.iter().any(|&axis| full_run(board, pos, axis) >= 5);
                assert_eq!(game.check_win(pos).unwrap(), expected, "mismatch at {pos}");
            }
        }
    }
}
