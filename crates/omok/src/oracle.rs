//! Move oracles: collaborators that propose a move for a board snapshot.

use crate::config::OmokConfig;
use crate::llm_client::LlmClient;
use crate::model::ModelSelection;
use async_trait::async_trait;
use derive_more::{Display, Error};
use omok_rules::{GameState, Position, Stone};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Board handed to an oracle.
///
/// Cells are row-major rows of black = 1, white = -1, empty = 0. This
/// encoding is the wire contract with oracle implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Board side length.
    pub size: usize,
    /// Encoded rows.
    pub cells: Vec<Vec<i8>>,
    /// Color the oracle is asked to play.
    pub to_move: Stone,
}

impl BoardSnapshot {
    /// Captures the current board and side to move.
    pub fn from_state(state: &GameState) -> Self {
        Self {
            size: state.board().size(),
            cells: state.board().to_wire_matrix(),
            to_move: state.current_turn(),
        }
    }

    /// Renders the rows as a JSON matrix, one row per line.
    pub fn matrix_text(&self) -> String {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                format!("[{}]", cells.join(","))
            })
            .collect();
        format!("[\n{}\n]", rows.join(",\n"))
    }
}

/// Anything that can propose a move for a position.
///
/// Implementations may be slow or fail; the arbiter bounds the wait and
/// falls back on its own when they do.
#[async_trait]
pub trait MoveOracle: Send + Sync {
    /// Proposes a move for `snapshot.to_move`, using `model`.
    async fn propose_move(
        &self,
        snapshot: BoardSnapshot,
        model: ModelSelection,
    ) -> Result<Position, OracleError>;
}

/// Category of oracle failure. All of them trigger the same fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OracleErrorKind {
    /// Backend unreachable, misconfigured, or returned an API error.
    Unavailable,
    /// Reply could not be parsed into a move.
    Malformed,
    /// Proposed move is off the board.
    OutOfBounds,
    /// Proposed move targets an occupied cell.
    Occupied,
    /// No reply within the configured wait.
    Timeout,
}

/// Oracle error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Oracle error ({}): {} at {}:{}", kind, message, file, line)]
pub struct OracleError {
    /// What went wrong.
    pub kind: OracleErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl OracleError {
    /// Creates a new oracle error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: OracleErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        warn!(%kind, error_message = %message, "Oracle error created");
        Self {
            kind,
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmokMove {
    row: i64,
    col: i64,
}

/// Parses a `{"row": r, "col": c}` reply into a position on a `size` board.
///
/// Tolerates code fences and prose around the object by reading from the
/// first `{` to the last `}`.
#[instrument(skip(reply), fields(reply_length = reply.len()))]
pub fn parse_move(reply: &str, size: usize) -> Result<Position, OracleError> {
    let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) else {
        return Err(OracleError::new(
            OracleErrorKind::Malformed,
            format!("No JSON object in reply: {}", reply.trim()),
        ));
    };
    if end < start {
        return Err(OracleError::new(
            OracleErrorKind::Malformed,
            format!("Unbalanced JSON in reply: {}", reply.trim()),
        ));
    }

    let mv: OmokMove = serde_json::from_str(&reply[start..=end]).map_err(|e| {
        OracleError::new(
            OracleErrorKind::Malformed,
            format!("Invalid move JSON: {}", e),
        )
    })?;

    let in_range = |v: i64| usize::try_from(v).ok().filter(|v| *v < size);
    match (in_range(mv.row), in_range(mv.col)) {
        (Some(row), Some(col)) => Ok(Position::new(row, col)),
        _ => Err(OracleError::new(
            OracleErrorKind::OutOfBounds,
            format!("Move ({}, {}) is off a {}x{} board", mv.row, mv.col, size, size),
        )),
    }
}

const SYSTEM_PROMPT: &str = "You are a professional omok (gomoku) player. \
You are given a square board and must choose your next move. \
The board is a matrix of rows: 1 is a black stone, -1 is a white stone, 0 is an empty cell. \
Five or more stones of one color in a row, horizontally, vertically or diagonally, wins. \
Only empty cells may be played. \
Respond with a JSON object containing 'row' and 'col' fields, \
the 0-based indices of your move, and nothing else.";

/// Oracle backed by a language model.
#[derive(Debug, Clone)]
pub struct LlmOracle {
    config: OmokConfig,
}

impl LlmOracle {
    /// Creates an oracle using API keys and token limits from `config`.
    #[instrument(skip(config))]
    pub fn new(config: OmokConfig) -> Self {
        Self { config }
    }

    /// Builds the user message for a snapshot.
    pub fn user_prompt(snapshot: &BoardSnapshot) -> String {
        format!(
            "The current {size}x{size} board is:\n{matrix}\n\nMake your move as {color} ({value}).",
            size = snapshot.size,
            matrix = snapshot.matrix_text(),
            color = snapshot.to_move.to_string().to_lowercase(),
            value = snapshot.to_move.wire_value(),
        )
    }
}

#[async_trait]
impl MoveOracle for LlmOracle {
    #[instrument(skip(self, snapshot), fields(model = %model, to_move = %snapshot.to_move))]
    async fn propose_move(
        &self,
        snapshot: BoardSnapshot,
        model: ModelSelection,
    ) -> Result<Position, OracleError> {
        info!("AI is thinking");
        let llm_config = self
            .config
            .create_llm_config(model)
            .map_err(|e| OracleError::new(OracleErrorKind::Unavailable, e.message))?;
        let client = LlmClient::new(llm_config);

        let reply = client
            .generate(SYSTEM_PROMPT, &Self::user_prompt(&snapshot))
            .await
            .map_err(|e| OracleError::new(OracleErrorKind::Unavailable, e.message))?;

        debug!(reply = %reply, "Oracle reply received");
        parse_move(&reply, snapshot.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omok_rules::Game;

    #[test]
    fn test_parse_plain_json() {
        assert_eq!(
            parse_move(r#"{"row": 7, "col": 8}"#, 15).unwrap(),
            Position::new(7, 8)
        );
    }

    #[test]
    fn test_parse_fenced_json_with_prose() {
        let reply = "Sure! Here is my move:\n```json\n{\"row\": 0, \"col\": 14}\n```";
        assert_eq!(parse_move(reply, 15).unwrap(), Position::new(0, 14));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_move("I'd play the center.", 15).unwrap_err();
        assert_eq!(err.kind, OracleErrorKind::Malformed);
        let err = parse_move(r#"{"row": "seven"}"#, 15).unwrap_err();
        assert_eq!(err.kind, OracleErrorKind::Malformed);
    }

    #[test]
    fn test_parse_rejects_out_of_bounds() {
        let err = parse_move(r#"{"row": 15, "col": 0}"#, 15).unwrap_err();
        assert_eq!(err.kind, OracleErrorKind::OutOfBounds);
        let err = parse_move(r#"{"row": -1, "col": 3}"#, 15).unwrap_err();
        assert_eq!(err.kind, OracleErrorKind::OutOfBounds);
    }

    #[test]
    fn test_snapshot_encoding_and_prompt() {
        let mut game = Game::new(5);
        game.place_stone(Position::new(0, 0), true).unwrap();
        game.place_stone(Position::new(0, 1), true).unwrap();
        game.place_stone(Position::new(2, 2), true).unwrap();

        let snapshot = BoardSnapshot::from_state(game.state());
        assert_eq!(snapshot.to_move, Stone::White);
        assert_eq!(snapshot.cells[0], vec![1, -1, 0, 0, 0]);
        assert_eq!(snapshot.cells[2], vec![0, 0, 1, 0, 0]);

        let prompt = LlmOracle::user_prompt(&snapshot);
        assert!(prompt.contains("[1,-1,0,0,0]"));
        assert!(prompt.contains("as white (-1)"));
    }
}
