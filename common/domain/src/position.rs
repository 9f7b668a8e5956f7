use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Cell coordinate on a square board.
///
/// Travels over the wire as a two element array `[row, col]`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "({}, {})", row, col)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether both axes fall inside `[0, board_size - 1]`
    pub fn is_within(&self, board_size: usize) -> bool {
        self.row < board_size && self.col < board_size
    }
}

impl From<[usize; 2]> for Position {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}

impl From<Position> for [usize; 2] {
    fn from(Position { row, col }: Position) -> Self {
        [row, col]
    }
}
