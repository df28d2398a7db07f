use std::fmt;

use serde::{Deserialize, Serialize};

/// A square on the board, 1-indexed: row 1 is White's back rank, column 1 is
/// the a-file.
///
/// Coordinates are signed so that a generator can step off the edge of the
/// board and ask `is_in_bounds()` afterwards instead of guarding every step.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Position {
    row: i8,
    column: i8,
}

impl Position {
    pub const fn new(row: i8, column: i8) -> Self {
        Position { row, column }
    }

    pub const fn row(&self) -> i8 {
        self.row
    }

    pub const fn column(&self) -> i8 {
        self.column
    }

    /// 0-based row for grid indexing. Only meaningful when in bounds.
    pub const fn row_index(&self) -> usize {
        (self.row - 1) as usize
    }

    /// 0-based column for grid indexing. Only meaningful when in bounds.
    pub const fn column_index(&self) -> usize {
        (self.column - 1) as usize
    }

    pub const fn is_in_bounds(&self) -> bool {
        self.row >= 1 && self.row <= 8 && self.column >= 1 && self.column <= 8
    }

    /// The square `dr` rows and `dc` columns away. May be off the board.
    pub const fn offset(&self, dr: i8, dc: i8) -> Self {
        Position::new(self.row + dr, self.column + dc)
    }

    /// Grid indices, or `None` for an off-board square.
    pub(crate) fn indices(&self) -> Option<(usize, usize)> {
        self.is_in_bounds()
            .then(|| (self.row_index(), self.column_index()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_in_bounds() {
            let file = (b'a' + self.column_index() as u8) as char;
            write!(f, "{file}{}", self.row)
        } else {
            write!(f, "{{{}, {}}}", self.row, self.column)
        }
    }
}
