//! Keyboard mapping for the terminal UI.

use crate::arbiter::UserAction;
use crossterm::event::KeyCode;
use omok_rules::Position;

/// Moves the cursor one cell, clamped to a `size` board.
pub fn move_cursor(cursor: Position, key: KeyCode, size: usize) -> Position {
    let last = size.saturating_sub(1);
    match key {
        KeyCode::Left | KeyCode::Char('h') => {
            Position::new(cursor.row, cursor.col.saturating_sub(1))
        }
        KeyCode::Right | KeyCode::Char('l') => {
            Position::new(cursor.row, (cursor.col + 1).min(last))
        }
        KeyCode::Up | KeyCode::Char('k') => Position::new(cursor.row.saturating_sub(1), cursor.col),
        KeyCode::Down | KeyCode::Char('j') => Position::new((cursor.row + 1).min(last), cursor.col),
        _ => cursor,
    }
}

/// Whether `key` moves the cursor.
pub fn is_cursor_key(key: KeyCode) -> bool {
    matches!(
        key,
        KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Char('h' | 'j' | 'k' | 'l')
    )
}

/// Keys that map straight to an action regardless of game state.
pub fn fixed_action(key: KeyCode) -> Option<UserAction> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(UserAction::Quit),
        KeyCode::Char('n') => Some(UserAction::NewGame),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_at_edges() {
        let corner = Position::new(0, 0);
        assert_eq!(move_cursor(corner, KeyCode::Left, 15), corner);
        assert_eq!(move_cursor(corner, KeyCode::Up, 15), corner);

        let far = Position::new(14, 14);
        assert_eq!(move_cursor(far, KeyCode::Right, 15), far);
        assert_eq!(move_cursor(far, KeyCode::Down, 15), far);
    }

    #[test]
    fn test_cursor_moves() {
        let start = Position::new(7, 7);
        assert_eq!(move_cursor(start, KeyCode::Right, 15), Position::new(7, 8));
        assert_eq!(move_cursor(start, KeyCode::Char('k'), 15), Position::new(6, 7));
        assert_eq!(move_cursor(start, KeyCode::Char('x'), 15), start);
    }
}
