//! Board Position Engine.
//!
//! A player walks an inward rectangular spiral: right along the current row,
//! down the right edge, left along the bottom edge, up the left edge, then the
//! bounds shrink by one on every side and the walk repeats.
//!
//! Each leg keeps going while the remaining step count is still non-negative,
//! so the walk stops on the cell where the count first drops below zero. The
//! first leg starts on the current column, which means its first cell costs a
//! step without moving. Starting at `(0, 0)` with 4 steps therefore ends on
//! `(0, 4)`.

use crate::Position;

/// Advance `position` by `steps` cells along the spiral of a
/// `board_size` x `board_size` board.
///
/// `position` is expected to lie on the board. The result always does.
pub fn advance(position: Position, steps: u32, board_size: usize) -> Position {
    if board_size == 0 {
        return position;
    }

    let mut pos = position;
    let mut remaining = i64::from(steps);

    let mut left = pos.col as i64;
    let mut up = pos.row as i64;
    let mut col_limit = board_size as i64 - 1;
    let mut row_limit = board_size as i64 - 1;

    while remaining > 0 {
        let lap_start = remaining;

        // right
        let mut i = left;
        while i <= col_limit && remaining >= 0 {
            pos.col = i as usize;
            remaining -= 1;
            i += 1;
        }

        // down
        let mut i = up + 1;
        while i <= row_limit && remaining >= 0 {
            pos.row = i as usize;
            remaining -= 1;
            i += 1;
        }

        // left
        if up != row_limit {
            let mut i = col_limit - 1;
            while i >= left && remaining >= 0 {
                pos.col = i as usize;
                remaining -= 1;
                i -= 1;
            }
        }

        // up
        if left != col_limit {
            let mut i = row_limit - 1;
            while i > up && remaining >= 0 {
                pos.row = i as usize;
                remaining -= 1;
                i -= 1;
            }
        }

        // collapsed spiral, no cell left to visit
        if remaining == lap_start {
            break;
        }

        left += 1;
        col_limit -= 1;
        up += 1;
        row_limit -= 1;
    }

    pos
}
