//! Arena module - the playfield grid of settled cells
//!
//! Flat row-major storage (`y * width + x`), sized once at creation.
//! Coordinates: x grows to the right, y grows downward, (0, 0) is top-left.
//! The grid is cleared in place on game over; it is never reallocated.

use crate::scoring::line_clear_points;
use crate::types::{Cell, EMPTY};

/// Outcome of one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of full rows removed
    pub lines: u32,
    /// Points awarded (10, 20, 40, ... per successive row)
    pub points: u32,
}

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Arena {
    /// Create an empty arena. Dimensions are checked by `GameConfig::validate`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Build an arena from rows of equal length. Returns `None` for ragged
    /// or empty input.
    pub fn from_rows(rows: &[&[Cell]]) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height: rows.len(),
            cells: rows.concat(),
        })
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (x, y), `None` outside the field
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set cell at (x, y). Returns false outside the field.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Inside the field and non-empty
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// A row is full when none of its cells is empty.
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(|&c| c != EMPTY)
    }

    /// Remove row `y`, shift every row above it down by one and put an
    /// empty row on top. Returns false if `y` is out of range.
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let width = self.width;
        // Rows 0..y move to 1..=y; copy_within handles the overlap.
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(EMPTY);
        true
    }

    /// Remove every full row, scanning bottom to top.
    ///
    /// After a removal the same row index is tested again, since the row
    /// above has just moved into it. The n-th removed row is worth
    /// `10 * 2^(n-1)` points.
    pub fn sweep(&mut self) -> SweepResult {
        let mut result = SweepResult::default();
        let mut y = self.height;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                result.lines += 1;
                result.points = result
                    .points
                    .saturating_add(line_clear_points(result.lines));
            } else {
                y -= 1;
            }
        }
        result
    }

    /// Reset every cell to empty, keeping dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY)
    }

    /// Row-major cell storage
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
