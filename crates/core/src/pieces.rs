//! Pieces module - piece catalog and in-place matrix rotation
//!
//! Each piece is a small square matrix of cell values (2x2 for O, 4x4 for I,
//! 3x3 for the rest). Matrices are `Copy` values: every catalog lookup yields
//! an independent instance, and storing a piece in the next or hold slot
//! copies it, so rotating the active piece can never alter another slot.

use crate::types::{Cell, PieceKind, EMPTY, MAX_PIECE_SIZE};

/// Square piece matrix, at most `MAX_PIECE_SIZE` on a side.
///
/// Only the top-left `size x size` block is meaningful; the rest stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceMatrix {
    size: u8,
    cells: [[Cell; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
}

impl PieceMatrix {
    /// Build a matrix from rows. Returns `None` unless the rows form a square
    /// of side `1..=MAX_PIECE_SIZE` with at least one filled cell.
    pub fn from_rows(rows: &[&[Cell]]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_PIECE_SIZE || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        if rows.iter().all(|r| r.iter().all(|&c| c == EMPTY)) {
            return None;
        }
        let mut cells = [[EMPTY; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..size].copy_from_slice(row);
        }
        Some(Self {
            size: size as u8,
            cells,
        })
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell at column `x`, row `y`; empty outside the matrix.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size() || y >= self.size() {
            return EMPTY;
        }
        self.cells[y][x]
    }

    /// Rows of the meaningful `size x size` block
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let size = self.size();
        self.cells[..size].iter().map(move |row| &row[..size])
    }

    /// Non-empty cells as `(x, y, value)`
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != EMPTY)
                .map(move |(x, &v)| (x, y, v))
        })
    }

    /// Piece kind, read from the first non-empty cell
    pub fn kind(&self) -> Option<PieceKind> {
        self.filled().next().and_then(|(_, _, v)| PieceKind::from_cell(v))
    }

    fn transpose(&mut self) {
        let size = self.size();
        for y in 0..size {
            for x in 0..y {
                let tmp = self.cells[y][x];
                self.cells[y][x] = self.cells[x][y];
                self.cells[x][y] = tmp;
            }
        }
    }

    /// Rotate 90° clockwise in place: transpose, then reverse each row.
    pub fn rotate_cw(&mut self) {
        let size = self.size();
        self.transpose();
        for row in &mut self.cells[..size] {
            row[..size].reverse();
        }
    }

    /// Rotate 90° counter-clockwise in place: transpose, then reverse the row
    /// order. Exactly undoes [`PieceMatrix::rotate_cw`].
    pub fn rotate_ccw(&mut self) {
        let size = self.size();
        self.transpose();
        self.cells[..size].reverse();
    }
}

/// Spawn-orientation matrix for a piece kind.
///
/// Cells carry the kind's cell value so the renderer can pick its colour.
pub fn create_piece(kind: PieceKind) -> PieceMatrix {
    let (size, mask): (u8, [[Cell; MAX_PIECE_SIZE]; MAX_PIECE_SIZE]) = match kind {
        PieceKind::T => (3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        PieceKind::O => (2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        PieceKind::L => (3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        PieceKind::J => (3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        PieceKind::I => (4, [[0; 4], [1, 1, 1, 1], [0; 4], [0; 4]]),
        PieceKind::S => (3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        PieceKind::Z => (3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
    };
    let v = kind.cell_value();
    PieceMatrix {
        size,
        cells: mask.map(|row| row.map(|m| m * v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_of(m: &PieceMatrix) -> Vec<Vec<Cell>> {
        m.rows().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn catalog_sizes() {
        assert_eq!(create_piece(PieceKind::O).size(), 2);
        assert_eq!(create_piece(PieceKind::I).size(), 4);
        for kind in [PieceKind::T, PieceKind::L, PieceKind::J, PieceKind::S, PieceKind::Z] {
            assert_eq!(create_piece(kind).size(), 3, "{:?}", kind);
        }
    }

    #[test]
    fn every_piece_has_four_cells_of_its_own_value() {
        for kind in PieceKind::ALL {
            let m = create_piece(kind);
            let filled: Vec<_> = m.filled().collect();
            assert_eq!(filled.len(), 4, "{:?}", kind);
            assert!(filled.iter().all(|&(_, _, v)| v == kind.cell_value()));
            assert_eq!(m.kind(), Some(kind));
        }
    }

    #[test]
    fn rotate_cw_t_piece() {
        let mut m = create_piece(PieceKind::T);
        m.rotate_cw();
        assert_eq!(rows_of(&m), vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn rotate_ccw_undoes_rotate_cw() {
        for kind in PieceKind::ALL {
            let original = create_piece(kind);
            let mut m = original;
            m.rotate_cw();
            m.rotate_ccw();
            assert_eq!(m, original, "{:?}", kind);
        }
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let original = create_piece(kind);
            let mut m = original;
            for _ in 0..4 {
                m.rotate_cw();
            }
            assert_eq!(m, original, "{:?}", kind);
        }
    }

    #[test]
    fn copies_are_independent() {
        let held = create_piece(PieceKind::L);
        let mut active = held;
        active.rotate_cw();
        assert_ne!(active, held);
        assert_eq!(held, create_piece(PieceKind::L));
    }

    #[test]
    fn from_rows_rejects_non_square() {
        assert!(PieceMatrix::from_rows(&[&[1, 1], &[1]]).is_none());
        assert!(PieceMatrix::from_rows(&[]).is_none());
        let five: &[Cell] = &[0; 5];
        assert!(PieceMatrix::from_rows(&[five, five, five, five, five]).is_none());
        assert!(PieceMatrix::from_rows(&[&[7]]).is_some());
    }

    #[test]
    fn from_rows_rejects_empty_matrix() {
        assert!(PieceMatrix::from_rows(&[&[0]]).is_none());
        assert!(PieceMatrix::from_rows(&[&[0, 0], &[0, 0]]).is_none());
        assert!(PieceMatrix::from_rows(&[&[0, 0], &[0, 3]]).is_some());
    }

    #[test]
    fn get_outside_matrix_is_empty() {
        let m = create_piece(PieceKind::O);
        assert_eq!(m.get(0, 0), 2);
        assert_eq!(m.get(2, 0), EMPTY);
        assert_eq!(m.get(0, 3), EMPTY);
    }
}
