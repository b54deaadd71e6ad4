//! Rules engine error types.

use derive_more::{Display, Error};
use tracing::{instrument, warn};

/// Category of a rules engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RulesErrorKind {
    /// Coordinates fall outside the board.
    #[display("({row}, {col}) is out of bounds for a {size}x{size} board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board side length.
        size: usize,
    },
}

/// Rules engine error with location tracking.
///
/// Only raised for coordinates the engine cannot index. Occupied cells and
/// finished games are ordinary outcomes and come back as
/// [`Placement::Rejected`](crate::Placement::Rejected) instead.
#[derive(Debug, Clone, Display, Error)]
#[display("Rules error: {} at {}:{}", kind, file, line)]
pub struct RulesError {
    /// What went wrong.
    pub kind: RulesErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RulesError {
    /// Creates a new rules error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: RulesErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        warn!(%kind, "Rules error created");
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for an out-of-bounds error.
    #[track_caller]
    pub fn out_of_bounds(row: usize, col: usize, size: usize) -> Self {
        Self::new(RulesErrorKind::OutOfBounds { row, col, size })
    }
}
