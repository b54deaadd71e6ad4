//! Game rules for omok.
//!
//! Pure functions evaluating a [`Board`](crate::Board). Rules are kept
//! apart from board storage so the engine and tests can compose them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{AXES, check_win, run_length};
