//! Board coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based (row, column) coordinate on the board.
///
/// Displayed in column-label/row-number notation: column 0 is `A`, row 0
/// is `1`, so `Position::new(7, 11)` prints as `L8`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Zero-based row, counted from the top.
    pub row: usize,
    /// Zero-based column, counted from the left.
    pub col: usize,
}

impl Position {
    /// Creates a position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Column label: `A` through `Z`, then `AA`, `AB` and so on.
    pub fn column_label(self) -> String {
        let mut label = Vec::new();
        let mut n = self.col + 1;
        while n > 0 {
            n -= 1;
            label.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        label.iter().rev().map(|&b| b as char).collect()
    }

    /// Formats the position as column label plus 1-based row, e.g. `A1`.
    pub fn notation(self) -> String {
        format!("{}{}", self.column_label(), self.row + 1)
    }

    /// Steps `distance` cells along `(d_row, d_col)`.
    ///
    /// Returns `None` if the step would leave the non-negative quadrant;
    /// the upper bound is checked by the board.
    pub(crate) fn offset(self, d_row: isize, d_col: isize, distance: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row * distance)?;
        let col = self.col.checked_add_signed(d_col * distance)?;
        Some(Self::new(row, col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_origin() {
        assert_eq!(Position::new(0, 0).notation(), "A1");
    }

    #[test]
    fn test_notation_column_is_letter_row_is_number() {
        assert_eq!(Position::new(7, 11).notation(), "L8");
        assert_eq!(Position::new(14, 14).to_string(), "O15");
    }

    #[test]
    fn test_columns_past_z_use_two_letters() {
        assert_eq!(Position::new(0, 25).column_label(), "Z");
        assert_eq!(Position::new(0, 26).column_label(), "AA");
        assert_eq!(Position::new(0, 27).column_label(), "AB");
        assert_eq!(Position::new(29, 51).notation(), "AZ30");
        assert_eq!(Position::new(0, 52).column_label(), "BA");
    }

    #[test]
    fn test_offset_stops_at_zero() {
        let origin = Position::new(0, 3);
        assert_eq!(origin.offset(-1, 0, 1), None);
        assert_eq!(origin.offset(1, -1, 2), Some(Position::new(2, 1)));
    }
}
