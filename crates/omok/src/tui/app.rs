//! Application state and logic.

use super::input::{fixed_action, is_cursor_key, move_cursor};
use crate::arbiter::{ArbiterPhase, UserAction};
use crate::sink::{GameEvent, StateSnapshot};
use crossterm::event::KeyCode;
use omok_rules::Position;
use std::collections::VecDeque;
use tracing::debug;

const MAX_NOTICES: usize = 4;

/// Main application state: the last published snapshot plus local cursor.
#[derive(Debug, Default)]
pub struct App {
    snapshot: Option<StateSnapshot>,
    cursor: Position,
    notices: VecDeque<String>,
}

impl App {
    /// Creates a new application.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest state from the arbiter, if any arrived yet.
    pub fn snapshot(&self) -> Option<&StateSnapshot> {
        self.snapshot.as_ref()
    }

    /// Cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Recent notices, oldest first.
    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().map(String::as_str)
    }

    /// Status line for the current snapshot.
    pub fn status_line(&self) -> String {
        match &self.snapshot {
            None => "Waiting for game to start...".to_string(),
            Some(snapshot) if snapshot.phase == ArbiterPhase::AwaitingAi => {
                format!("{} | AI is thinking...", snapshot.label())
            }
            Some(snapshot) => snapshot.label(),
        }
    }

    /// Handles a game event from the arbiter.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::StateChanged(snapshot) => {
                // Keep the cursor on the board if its size changed.
                let last = snapshot.board.size().saturating_sub(1);
                if self.snapshot.is_none() {
                    self.cursor = Position::new(last / 2, last / 2);
                }
                self.cursor = Position::new(self.cursor.row.min(last), self.cursor.col.min(last));
                self.snapshot = Some(snapshot);
            }
            GameEvent::Notice(notice) => {
                self.notices.push_back(notice.to_string());
                while self.notices.len() > MAX_NOTICES {
                    self.notices.pop_front();
                }
            }
        }
    }

    /// Maps a key press to an action for the arbiter, moving the cursor locally.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<UserAction> {
        if let Some(action) = fixed_action(key) {
            return Some(action);
        }
        let snapshot = self.snapshot.as_ref()?;

        if is_cursor_key(key) {
            self.cursor = move_cursor(self.cursor, key, snapshot.board.size());
            return None;
        }

        match key {
            KeyCode::Enter | KeyCode::Char(' ') => Some(UserAction::PlaceStone {
                row: self.cursor.row,
                col: self.cursor.col,
            }),
            KeyCode::Char('m') => Some(UserAction::ChangeMode(snapshot.mode.toggle())),
            KeyCode::Char('c') => Some(UserAction::ChangeModel(snapshot.model.cycle())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::GameMode;
    use crate::model::ModelSelection;
    use crate::sink::Notice;
    use omok_rules::{Board, Stone};

    fn snapshot(phase: ArbiterPhase) -> StateSnapshot {
        StateSnapshot {
            board: Board::new(15),
            current_turn: Stone::White,
            game_over: false,
            mode: GameMode::Pve,
            model: ModelSelection::Gpt4oMini,
            phase,
            ai_color: Stone::White,
            last_move: None,
            status_message: "Turn: White".to_string(),
        }
    }

    #[test]
    fn test_cursor_starts_centered() {
        let mut app = App::new();
        app.handle_event(GameEvent::StateChanged(snapshot(ArbiterPhase::Idle)));
        assert_eq!(app.cursor(), Position::new(7, 7));
    }

    #[test]
    fn test_enter_places_at_cursor() {
        let mut app = App::new();
        app.handle_event(GameEvent::StateChanged(snapshot(ArbiterPhase::Idle)));
        assert_eq!(app.handle_key(KeyCode::Right), None);
        assert_eq!(
            app.handle_key(KeyCode::Enter),
            Some(UserAction::PlaceStone { row: 7, col: 8 })
        );
    }

    #[test]
    fn test_mode_and_model_keys() {
        let mut app = App::new();
        app.handle_event(GameEvent::StateChanged(snapshot(ArbiterPhase::Idle)));
        assert_eq!(
            app.handle_key(KeyCode::Char('m')),
            Some(UserAction::ChangeMode(GameMode::Pvp))
        );
        assert_eq!(
            app.handle_key(KeyCode::Char('c')),
            Some(UserAction::ChangeModel(ModelSelection::O4Mini))
        );
        assert_eq!(app.handle_key(KeyCode::Char('q')), Some(UserAction::Quit));
    }

    #[test]
    fn test_status_line_shows_thinking() {
        let mut app = App::new();
        assert_eq!(app.status_line(), "Waiting for game to start...");
        app.handle_event(GameEvent::StateChanged(snapshot(ArbiterPhase::AwaitingAi)));
        assert_eq!(
            app.status_line(),
            "Mode: PvE | Turn: White (AI) | AI is thinking..."
        );
    }

    #[test]
    fn test_notices_are_bounded() {
        let mut app = App::new();
        for _ in 0..10 {
            app.handle_event(GameEvent::Notice(Notice::NewGame));
        }
        assert_eq!(app.notices().count(), MAX_NOTICES);
    }
}
