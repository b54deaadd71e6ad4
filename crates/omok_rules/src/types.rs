//! Core domain types for omok.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Stone color. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Stone {
    /// First player.
    Black,
    /// Second player.
    White,
}

impl Stone {
    /// Returns the other color.
    pub fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Numeric encoding agreed with move oracles: black = 1, white = -1.
    pub fn wire_value(self) -> i8 {
        match self {
            Stone::Black => 1,
            Stone::White => -1,
        }
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// No stone.
    #[default]
    Empty,
    /// Cell holds a stone of the given color.
    Occupied(Stone),
}

impl Square {
    /// Numeric encoding agreed with move oracles: empty = 0.
    pub fn wire_value(self) -> i8 {
        match self {
            Square::Empty => 0,
            Square::Occupied(stone) => stone.wire_value(),
        }
    }

    /// Returns the stone in this cell, if any.
    pub fn stone(self) -> Option<Stone> {
        match self {
            Square::Empty => None,
            Square::Occupied(stone) => Some(stone),
        }
    }
}
