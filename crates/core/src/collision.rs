//! Collision module - overlap tests and placement transforms
//!
//! Pure functions over an [`Arena`] and a [`PieceMatrix`] placed at a
//! [`Position`] (the matrix's top-left corner in field coordinates).

use crate::arena::Arena;
use crate::pieces::PieceMatrix;

/// Top-left offset of a piece matrix in field coordinates. y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// True if any filled cell of `matrix` at `pos` lands on a settled cell,
/// left or right of the field, or below its bottom row.
///
/// Rows above the top of the field are open space: a cell there only
/// collides if it is also outside the horizontal bounds.
pub fn collide(arena: &Arena, matrix: &PieceMatrix, pos: Position) -> bool {
    let width = arena.width() as i32;
    let height = arena.height() as i32;
    matrix.filled().any(|(dx, dy, _)| {
        let x = pos.x + dx as i32;
        let y = pos.y + dy as i32;
        if x < 0 || x >= width || y >= height {
            return true;
        }
        y >= 0 && arena.is_occupied(x, y)
    })
}

/// Write every filled cell of `matrix` at `pos` into the arena.
///
/// Does not check for collisions; callers test with [`collide`] first.
/// Cells outside the field are dropped.
pub fn merge(arena: &mut Arena, matrix: &PieceMatrix, pos: Position) {
    for (dx, dy, v) in matrix.filled() {
        arena.set(pos.x + dx as i32, pos.y + dy as i32, v);
    }
}

/// Where the piece would rest after falling straight down.
pub fn ghost_position(arena: &Arena, matrix: &PieceMatrix, pos: Position) -> Position {
    let mut ghost = pos;
    while !collide(arena, matrix, ghost) {
        ghost.y += 1;
    }
    ghost.y -= 1;
    ghost
}
