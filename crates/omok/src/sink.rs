//! Render sinks: where the arbiter pushes state for presentation.

use crate::arbiter::ArbiterPhase;
use crate::mode::GameMode;
use crate::model::ModelSelection;
use derive_more::Display;
use omok_rules::{Board, Position, Stone};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Board contents.
    pub board: Board,
    /// Color to move.
    pub current_turn: Stone,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Active game mode.
    pub mode: GameMode,
    /// Model the oracle will be asked.
    pub model: ModelSelection,
    /// Arbiter phase.
    pub phase: ArbiterPhase,
    /// Color played by the oracle in PvE.
    pub ai_color: Stone,
    /// Most recent placement.
    pub last_move: Option<Position>,
    /// Turn or result message.
    pub status_message: String,
}

impl StateSnapshot {
    /// Whether the side to move is the oracle.
    pub fn ai_to_move(&self) -> bool {
        self.mode == GameMode::Pve && self.current_turn == self.ai_color
    }

    /// One-line status label, e.g. `Mode: PvE | Turn: White (AI)`.
    pub fn label(&self) -> String {
        if self.game_over {
            return format!("Game Over | {}", self.status_message);
        }
        let player = if self.ai_to_move() { "AI" } else { "Human" };
        format!(
            "Mode: {} | Turn: {} ({})",
            self.mode.name(),
            self.current_turn,
            player
        )
    }
}

/// Transient notifications. Never change game state by themselves.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Notice {
    /// A fresh game began.
    #[display("New game started!")]
    NewGame,
    /// Mode switched (also starts a new game).
    #[display("Game mode changed to {}", _0.name())]
    ModeChanged(GameMode),
    /// Oracle model switched.
    #[display("Model changed to {_0}")]
    ModelChanged(ModelSelection),
    /// The oracle failed; the AI played a random empty cell instead.
    #[display("AI move unavailable ({reason}); played {fallback} at random")]
    OracleFallback {
        /// Why the oracle's answer was not used.
        reason: String,
        /// Where the fallback stone went.
        fallback: Position,
    },
    /// Input was refused, e.g. off-board coordinates.
    #[display("{_0}")]
    Rejected(String),
}

/// Presentation-side collaborator. Called on the arbiter's control thread.
pub trait RenderSink: Send {
    /// Called after every transition that changes board, turn or phase.
    fn on_state_changed(&mut self, snapshot: &StateSnapshot);

    /// Called for transient notifications.
    fn on_notice(&mut self, notice: &Notice);
}

/// Messages sent from the arbiter to the UI.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Game state updated.
    StateChanged(StateSnapshot),
    /// Something worth a toast.
    Notice(Notice),
}

/// Sink forwarding events over a channel to a UI task.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelSink {
    /// Creates a sink sending into `event_tx`.
    pub fn new(event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { event_tx }
    }

    fn send(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            warn!("UI channel closed, dropping event");
        }
    }
}

impl RenderSink for ChannelSink {
    fn on_state_changed(&mut self, snapshot: &StateSnapshot) {
        debug!(phase = ?snapshot.phase, turn = %snapshot.current_turn, "Publishing state");
        self.send(GameEvent::StateChanged(snapshot.clone()));
    }

    fn on_notice(&mut self, notice: &Notice) {
        debug!(%notice, "Publishing notice");
        self.send(GameEvent::Notice(notice.clone()));
    }
}
