//! Move arbiter: sequences human and oracle turns over one control loop.
//!
//! The arbiter is the only writer of the [`Game`]. Oracle requests run on
//! spawned tasks and report back over a channel; their results are applied
//! on the control loop, and only if they still belong to the current game.
//!
//! ```text
//! Idle ──human click──▶ Idle | AwaitingAi | Terminal
//! AwaitingAi ──human click──▶ AwaitingAi          (ignored)
//! AwaitingAi ──oracle reply──▶ Idle | Terminal     (random fallback on failure)
//! * ──new game / mode change──▶ Idle | AwaitingAi  (epoch bumped)
//! ```

use crate::config::OmokConfig;
use crate::mode::GameMode;
use crate::model::ModelSelection;
use crate::oracle::{BoardSnapshot, MoveOracle, OracleError, OracleErrorKind};
use crate::sink::{Notice, RenderSink, StateSnapshot};
use omok_rules::{Game, GameState, Placement, Position, RulesError, Stone};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Where the arbiter is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArbiterPhase {
    /// Waiting for the next input; placements accepted.
    Idle,
    /// An oracle request is outstanding; human placements are refused.
    AwaitingAi,
    /// Game over; nothing is accepted until a new game starts.
    Terminal,
}

/// Requests from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Place a stone for the side to move.
    PlaceStone {
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        col: usize,
    },
    /// Abandon the current game and start another.
    NewGame,
    /// Switch mode. Starts a new game.
    ChangeMode(GameMode),
    /// Switch the oracle's model for subsequent requests.
    ChangeModel(ModelSelection),
    /// Stop the control loop.
    Quit,
}

/// Identifies one oracle request: the game epoch it was issued in plus a
/// per-arbiter sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTag {
    /// Game generation at dispatch.
    pub epoch: u64,
    /// Request sequence number.
    pub seq: u64,
}

/// Result of one oracle request, tagged with the request it answers.
#[derive(Debug)]
pub struct OracleReply {
    tag: RequestTag,
    outcome: Result<Position, OracleError>,
}

impl OracleReply {
    /// Which request this answers.
    pub fn tag(&self) -> RequestTag {
        self.tag
    }

    /// The oracle's proposal or failure.
    pub fn outcome(&self) -> &Result<Position, OracleError> {
        &self.outcome
    }
}

/// Sequences turns between humans and the move oracle.
pub struct MoveArbiter {
    game: Game,
    phase: ArbiterPhase,
    board_size: usize,
    mode: GameMode,
    ai_color: Stone,
    model: ModelSelection,
    oracle_timeout: Duration,
    status_message: String,
    epoch: u64,
    next_seq: u64,
    pending: Option<RequestTag>,
    oracle: Arc<dyn MoveOracle>,
    sink: Box<dyn RenderSink>,
    rng: StdRng,
    reply_tx: mpsc::UnboundedSender<OracleReply>,
    reply_rx: mpsc::UnboundedReceiver<OracleReply>,
}

impl MoveArbiter {
    /// Creates an arbiter for a fresh game. Call [`start`](Self::start)
    /// (or [`run`](Self::run)) to publish the first state.
    #[instrument(skip_all, fields(mode = %config.mode(), model = %config.model()))]
    pub fn new(
        config: &OmokConfig,
        oracle: Arc<dyn MoveOracle>,
        sink: Box<dyn RenderSink>,
    ) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let board_size = *config.board_size();
        info!(board_size, "Creating move arbiter");
        Self {
            game: Game::new(board_size),
            phase: ArbiterPhase::Idle,
            board_size,
            mode: *config.mode(),
            ai_color: *config.ai_color(),
            model: *config.model(),
            oracle_timeout: config.oracle_timeout(),
            status_message: turn_message(Stone::Black),
            epoch: 0,
            next_seq: 0,
            pending: None,
            oracle,
            sink,
            rng: StdRng::from_entropy(),
            reply_tx,
            reply_rx,
        }
    }

    /// Seeds the fallback move picker, for reproducible games.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Publishes the initial state, dispatching to the oracle if it moves first.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        self.begin_turn();
        self.publish();
    }

    /// Current phase.
    pub fn phase(&self) -> ArbiterPhase {
        self.phase
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    /// Current game generation. Bumped by every reset.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Active mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Model used for the next oracle request.
    pub fn model(&self) -> ModelSelection {
        self.model
    }

    /// Builds the snapshot pushed to the render sink.
    pub fn snapshot(&self) -> StateSnapshot {
        let state = self.game.state();
        StateSnapshot {
            board: state.board().clone(),
            current_turn: state.current_turn(),
            game_over: state.game_over(),
            mode: self.mode,
            model: self.model,
            phase: self.phase,
            ai_color: self.ai_color,
            last_move: state.last_move(),
            status_message: self.status_message.clone(),
        }
    }

    /// Handles a human click at (row, col).
    ///
    /// Only accepted while [`ArbiterPhase::Idle`]; otherwise the rules
    /// engine is called with the placement gated off and nothing changes.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds [`RulesError`] for off-board coordinates.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn request_place_stone(&mut self, row: usize, col: usize) -> Result<Placement, RulesError> {
        let available = self.phase == ArbiterPhase::Idle;
        let placement = self.game.place_stone(Position::new(row, col), available)?;
        if placement.is_placed() {
            self.after_placement(placement);
        } else {
            debug!("Click ignored");
        }
        Ok(placement)
    }

    /// Abandons the current game, invalidating any outstanding oracle request.
    #[instrument(skip(self))]
    pub fn request_new_game(&mut self) {
        self.reset_game();
        self.sink.on_notice(&Notice::NewGame);
        self.publish();
    }

    /// Switches mode and starts a new game.
    #[instrument(skip(self))]
    pub fn request_mode_change(&mut self, mode: GameMode) {
        info!(from = %self.mode, to = %mode, "Changing game mode");
        self.mode = mode;
        self.reset_game();
        self.sink.on_notice(&Notice::ModeChanged(mode));
        self.publish();
    }

    /// Switches the oracle model. An outstanding request keeps its model;
    /// the board is untouched so its result stays valid.
    #[instrument(skip(self))]
    pub fn request_model_change(&mut self, model: ModelSelection) {
        info!(from = %self.model, to = %model, "Changing model");
        self.model = model;
        self.sink.on_notice(&Notice::ModelChanged(model));
        self.publish();
    }

    /// Dispatches one user action. Breaks on [`UserAction::Quit`].
    pub fn handle_action(&mut self, action: UserAction) -> ControlFlow<()> {
        match action {
            UserAction::PlaceStone { row, col } => {
                if let Err(e) = self.request_place_stone(row, col) {
                    warn!(error = %e, "Placement refused");
                    self.sink.on_notice(&Notice::Rejected(e.kind.to_string()));
                }
            }
            UserAction::NewGame => self.request_new_game(),
            UserAction::ChangeMode(mode) => self.request_mode_change(mode),
            UserAction::ChangeModel(model) => self.request_model_change(model),
            UserAction::Quit => {
                info!("Quit requested");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Waits for the next oracle reply, current or stale.
    pub async fn next_reply(&mut self) -> Option<OracleReply> {
        self.reply_rx.recv().await
    }

    /// Applies an oracle reply on the control loop.
    ///
    /// Replies for anything but the outstanding request are dropped. A
    /// failed, off-board, or occupied-cell proposal is replaced with a
    /// uniformly random empty cell.
    #[instrument(skip(self, reply), fields(tag = ?reply.tag))]
    pub fn handle_reply(&mut self, reply: OracleReply) {
        if self.pending != Some(reply.tag) {
            info!(current_epoch = self.epoch, "Discarding stale oracle reply");
            return;
        }
        self.pending = None;

        let proposal = reply.outcome.and_then(|pos| self.validate(pos));
        let pos = match proposal {
            Ok(pos) => {
                info!(at = %pos, "Applying oracle move");
                pos
            }
            Err(e) => {
                warn!(error = %e, "Oracle move unusable, falling back to random");
                let Some(fallback) = self.random_empty() else {
                    error!("No empty cell for fallback move");
                    self.phase = ArbiterPhase::Idle;
                    self.publish();
                    return;
                };
                self.sink.on_notice(&Notice::OracleFallback {
                    reason: e.kind.to_string(),
                    fallback,
                });
                fallback
            }
        };

        match self.game.place_stone(pos, true) {
            Ok(placement) if placement.is_placed() => self.after_placement(placement),
            other => {
                error!(result = ?other, "Validated oracle move was not placed");
                self.phase = ArbiterPhase::Idle;
                self.publish();
            }
        }
    }

    /// Runs the control loop until `actions` closes or a quit arrives.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut actions: mpsc::UnboundedReceiver<UserAction>) {
        info!("Starting arbiter loop");
        self.start();

        loop {
            tokio::select! {
                action = actions.recv() => match action {
                    Some(action) => {
                        if self.handle_action(action).is_break() {
                            break;
                        }
                    }
                    None => {
                        info!("Action channel closed");
                        break;
                    }
                },
                Some(reply) = self.reply_rx.recv() => self.handle_reply(reply),
            }
        }

        info!("Arbiter loop finished");
    }

    fn ai_to_move(&self) -> bool {
        self.mode == GameMode::Pve
            && !self.game.state().game_over()
            && self.game.state().current_turn() == self.ai_color
    }

    fn reset_game(&mut self) {
        self.epoch += 1;
        if let Some(tag) = self.pending.take() {
            debug!(?tag, "Invalidating outstanding oracle request");
        }
        self.game.reset(self.board_size);
        self.status_message = turn_message(Stone::Black);
        self.begin_turn();
    }

    fn begin_turn(&mut self) {
        if self.ai_to_move() {
            self.dispatch();
        } else {
            self.phase = ArbiterPhase::Idle;
        }
    }

    fn after_placement(&mut self, placement: Placement) {
        if let Some(message) = placement.message() {
            self.status_message = message;
        }
        if placement.is_terminal() {
            info!(
                status = %self.status_message,
                board = %self.game.state().board().display(),
                "Game over"
            );
            self.phase = ArbiterPhase::Terminal;
        } else {
            self.begin_turn();
        }
        self.publish();
    }

    fn dispatch(&mut self) {
        let tag = RequestTag {
            epoch: self.epoch,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending = Some(tag);
        self.phase = ArbiterPhase::AwaitingAi;

        let snapshot = BoardSnapshot::from_state(self.game.state());
        let oracle = Arc::clone(&self.oracle);
        let model = self.model;
        let wait = self.oracle_timeout;
        let reply_tx = self.reply_tx.clone();
        info!(?tag, %model, "Dispatching oracle request");

        tokio::spawn(async move {
            let call = tokio::time::timeout(wait, oracle.propose_move(snapshot, model));
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(_) => Err(OracleError::new(
                    OracleErrorKind::Timeout,
                    format!("No reply within {:?}", wait),
                )),
            };
            if reply_tx.send(OracleReply { tag, outcome }).is_err() {
                debug!("Arbiter gone, dropping oracle reply");
            }
        });
    }

    fn validate(&self, pos: Position) -> Result<Position, OracleError> {
        let board = self.game.state().board();
        if !board.contains(pos) {
            return Err(OracleError::new(
                OracleErrorKind::OutOfBounds,
                format!("({}, {}) is off the board", pos.row, pos.col),
            ));
        }
        if !board.is_empty(pos) {
            return Err(OracleError::new(
                OracleErrorKind::Occupied,
                format!("{} is already occupied", pos),
            ));
        }
        Ok(pos)
    }

    fn random_empty(&mut self) -> Option<Position> {
        self.game
            .state()
            .board()
            .empty_positions()
            .choose(&mut self.rng)
            .copied()
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.sink.on_state_changed(&snapshot);
    }
}

fn turn_message(turn: Stone) -> String {
    format!("Turn: {}", turn)
}
