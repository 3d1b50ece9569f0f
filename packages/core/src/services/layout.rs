//! Derived Layout Positions
//!
//! The layout collaborator supplies a coordinate for root creation; for
//! continued and forked exchanges the position is derived from the source
//! node with a fixed offset. The engine stores coordinates, it never
//! interprets them.

use crate::models::Position;

/// Vertical offset for a continued exchange (same column, next row)
pub const CONTINUE_OFFSET_Y: f64 = 300.0;

/// Horizontal offset for a forked exchange (same row, next column)
pub const FORK_OFFSET_X: f64 = 500.0;

/// Position for a node continued from `source`
pub fn continue_position(source: Position) -> Position {
    Position::new(source.x, source.y + CONTINUE_OFFSET_Y)
}

/// Position for a node forked from `source`
pub fn fork_position(source: Position) -> Position {
    Position::new(source.x + FORK_OFFSET_X, source.y)
}
