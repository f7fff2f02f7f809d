//! Read-only copy of everything a renderer needs for one frame.
//!
//! [`GameSnapshot`] owns its field buffer so a caller can keep one around and
//! refill it every frame with [`GameState::snapshot_into`] without
//! reallocating.
//!
//! [`GameState::snapshot_into`]: crate::game_state::GameState::snapshot_into

use crate::pieces::PieceMatrix;
use crate::types::{Cell, BASE_DROP_MS, EMPTY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub matrix: PieceMatrix,
    pub x: i32,
    pub y: i32,
}

impl ActiveSnapshot {
    /// Field coordinates and values of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.matrix
            .filled()
            .map(move |(dx, dy, v)| (self.x + dx as i32, self.y + dy as i32, v))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Settled cells, row-major, `width * height` long
    pub field: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on
    pub ghost_y: Option<i32>,
    pub next: Option<PieceMatrix>,
    pub hold: Option<PieceMatrix>,
    pub can_hold: bool,
    pub paused: bool,
    pub score: u32,
    pub high_score: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.field.fill(EMPTY);
        self.active = None;
        self.ghost_y = None;
        self.next = None;
        self.hold = None;
        self.can_hold = true;
        self.paused = false;
        self.score = 0;
        self.high_score = 0;
        self.drop_interval_ms = BASE_DROP_MS;
    }

    /// Settled cell at (x, y), or [`EMPTY`] outside the field.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return EMPTY;
        }
        self.field.get(y * self.width + x).copied().unwrap_or(EMPTY)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            field: Vec::new(),
            active: None,
            ghost_y: None,
            next: None,
            hold: None,
            can_hold: true,
            paused: false,
            score: 0,
            high_score: 0,
            drop_interval_ms: BASE_DROP_MS,
        }
    }
}
