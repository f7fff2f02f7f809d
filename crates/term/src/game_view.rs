//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceMatrix};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const SOLID: char = '█';
const GHOST: char = '░';
const GRID_DOT: char = '·';
/// Minimum columns right of the field needed to draw the side panel.
const PANEL_MIN_W: u16 = 12;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Full-field message drawn over the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    GameOver { final_score: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Display color for each piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::T => Rgb::from_hex(0xA020F0),
        PieceKind::O => Rgb::from_hex(0xFFD700),
        PieceKind::L => Rgb::from_hex(0xFF8C00),
        PieceKind::J => Rgb::from_hex(0x1E90FF),
        PieceKind::I => Rgb::from_hex(0x00FFFF),
        PieceKind::S => Rgb::from_hex(0xFF69B4),
        PieceKind::Z => Rgb::from_hex(0xFF0000),
    }
}

/// Outer frame geometry of the field, in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_banner(snap, None, viewport, fb);
    }

    pub fn render_into_with_banner(
        &self,
        snap: &GameSnapshot,
        banner: Option<&Banner>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(snap, viewport);
        let border = CellStyle::fg(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, frame, border);

        // Settled cells, grid dots elsewhere.
        for y in 0..snap.height {
            for x in 0..snap.width {
                match PieceKind::from_cell(snap.cell(x, y)) {
                    Some(kind) => self.draw_block(fb, frame, x as i32, y as i32, kind),
                    None => self.draw_empty(fb, frame, x as i32, y as i32),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            if let Some(kind) = active.matrix.kind() {
                let style = CellStyle::fg(piece_color(kind).darken(40), FIELD_BG).dim();
                for (dx, dy, _) in active.matrix.filled() {
                    let x = active.x + dx as i32;
                    let y = ghost_y + dy as i32;
                    self.fill_field_cell(fb, frame, snap, x, y, GHOST, style);
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y, v) in active.cells() {
                if let Some(kind) = PieceKind::from_cell(v) {
                    if in_field(snap, x, y) {
                        self.draw_block(fb, frame, x, y, kind);
                    }
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match banner {
            Some(Banner::GameOver { final_score }) => {
                let mut score = ScoreLine::default();
                let lines = ["GAME OVER", score.format(*final_score), "press any key"];
                self.draw_overlay(fb, frame, &lines);
            }
            None if snap.paused => {
                self.draw_overlay(fb, frame, &["PAUSED", "Esc resume", "R restart", "Q quit"]);
            }
            None => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_banner(
        &self,
        snap: &GameSnapshot,
        banner: Option<&Banner>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_banner(snap, banner, viewport, &mut fb);
        fb
    }

    fn frame(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let w = (snap.width as u16).saturating_mul(self.cell_w).saturating_add(2);
        let h = (snap.height as u16).saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32) {
        let style = CellStyle::fg(Rgb::new(90, 90, 100), FIELD_BG).dim();
        let (px, py) = self.cell_origin(frame, x as u16, y as u16);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        // One dot per cell, in its left column.
        for dy in 0..self.cell_h {
            fb.put_char(px, py + dy, GRID_DOT, style);
        }
    }

    /// A solid block with a lit left edge and a shaded right edge.
    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32, kind: PieceKind) {
        let base = piece_color(kind);
        let (px, py) = self.cell_origin(frame, x as u16, y as u16);
        for dx in 0..self.cell_w {
            let fg = if self.cell_w == 1 {
                base
            } else if dx == 0 {
                base.lighten(35)
            } else if dx + 1 == self.cell_w {
                base.darken(30)
            } else {
                base
            };
            let style = CellStyle::fg(fg, FIELD_BG).bold();
            for dy in 0..self.cell_h {
                fb.put_char(px + dx, py + dy, SOLID, style);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_field_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        x: i32,
        y: i32,
        ch: char,
        style: CellStyle,
    ) {
        if !in_field(snap, x, y) {
            return;
        }
        let (px, py) = self.cell_origin(frame, x as u16, y as u16);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn cell_origin(&self, frame: Frame, x: u16, y: u16) -> (u16, u16) {
        (
            frame.x + 1 + x * self.cell_w,
            frame.y + 1 + y * self.cell_h,
        )
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "HIGH", label);
        fb.put_u32(panel_x, y + 1, snap.high_score, value);
        y += 3;

        fb.put_str(panel_x, y, "SPEED", label);
        let end = fb.put_u32(panel_x, y + 1, snap.drop_interval_ms, value);
        fb.put_str(end, y + 1, "ms", value);
        y += 3;

        fb.put_str(panel_x, y, "HOLD", label);
        if let Some(hold) = &snap.hold {
            // Greyed out until the next spawn re-enables hold.
            self.draw_preview(fb, panel_x, y + 1, hold, !snap.can_hold);
        } else {
            fb.put_str(panel_x, y + 1, "-", value);
        }
        y += 6;

        fb.put_str(panel_x, y, "NEXT", label);
        if let Some(next) = &snap.next {
            self.draw_preview(fb, panel_x, y + 1, next, false);
        }
    }

    /// Piece matrix at panel scale, starting at its first filled row.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, matrix: &PieceMatrix, dim: bool) {
        let top = matrix.filled().map(|(_, dy, _)| dy).min().unwrap_or(0);
        for (dx, dy, v) in matrix.filled() {
            let Some(kind) = PieceKind::from_cell(v) else {
                continue;
            };
            let mut style = CellStyle::fg(piece_color(kind), PANEL_BG);
            if dim {
                style = style.dim();
            }
            let px = x + dx as u16 * 2;
            let py = y + (dy - top) as u16;
            fb.put_char(px, py, SOLID, style);
            fb.put_char(px + 1, py, SOLID, style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
        let style = CellStyle::fg(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let hint = CellStyle::fg(Rgb::new(180, 180, 180), PANEL_BG);
        let inner_w = frame.w.saturating_sub(2);
        let top = frame
            .y
            .saturating_add(frame.h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let text_w = line.chars().count() as u16;
            let row = top + i as u16;
            // Blank the row inside the border so the text reads cleanly.
            fb.fill_rect(frame.x + 1, row, inner_w, 1, ' ', hint);
            let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
            fb.put_str(x, row, line, if i == 0 { style } else { hint });
        }
    }
}

fn in_field(snap: &GameSnapshot, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && (x as usize) < snap.width && (y as usize) < snap.height
}

/// "score N" without a heap allocation per frame.
#[derive(Default)]
struct ScoreLine {
    buf: [u8; 16],
}

impl ScoreLine {
    fn format(&mut self, n: u32) -> &str {
        const PREFIX: &[u8] = b"score ";
        self.buf[..PREFIX.len()].copy_from_slice(PREFIX);
        let mut digits = [0u8; 10];
        let mut len = 0;
        let mut rest = n;
        loop {
            digits[len] = b'0' + (rest % 10) as u8;
            len += 1;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        for (i, &d) in digits[..len].iter().rev().enumerate() {
            self.buf[PREFIX.len() + i] = d;
        }
        std::str::from_utf8(&self.buf[..PREFIX.len() + len]).unwrap_or("score")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameState, SequencePieces};

    fn snapshot(kinds: &[PieceKind]) -> GameSnapshot {
        GameState::new(GameConfig::default(), SequencePieces::new(kinds.to_vec()))
            .unwrap()
            .snapshot()
    }

    fn contains(fb: &FrameBuffer, needle: &str) -> bool {
        (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn border_wraps_the_field() {
        let snap = snapshot(&[PieceKind::O]);
        let fb = GameView::default()
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(26, 22));
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(25, 0).map(|c| c.ch), Some('┐'));
        assert_eq!(fb.get(0, 21).map(|c| c.ch), Some('└'));
        assert_eq!(fb.get(25, 21).map(|c| c.ch), Some('┘'));
        // Empty bottom-left cell shows the grid dot.
        assert_eq!(fb.get(1, 20).map(|c| c.ch), Some(GRID_DOT));
    }

    #[test]
    fn active_piece_uses_kind_color_with_shading() {
        let snap = snapshot(&[PieceKind::T]);
        let fb = GameView::default()
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(26, 22));
        // T at x=5: its top cell is field (6, 0), terminal columns 13-14.
        let left = fb.get(13, 1).unwrap();
        let right = fb.get(14, 1).unwrap();
        assert_eq!(left.ch, SOLID);
        assert_eq!(left.style.fg, piece_color(PieceKind::T).lighten(35));
        assert_eq!(right.style.fg, piece_color(PieceKind::T).darken(30));
    }

    #[test]
    fn ghost_marks_landing_row() {
        let snap = snapshot(&[PieceKind::O]);
        let fb = GameView::default()
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(26, 22));
        // O lands on rows 18-19, columns 5-6.
        assert_eq!(fb.get(11, 19).map(|c| c.ch), Some(GHOST));
        assert_eq!(fb.get(14, 20).map(|c| c.ch), Some(GHOST));
        assert_eq!(fb.get(15, 20).map(|c| c.ch), Some(GRID_DOT));
    }

    #[test]
    fn side_panel_shows_stats() {
        let mut snap = snapshot(&[PieceKind::I, PieceKind::Z]);
        snap.score = 150;
        snap.high_score = 4090;
        let fb = GameView::default().render(&snap, Viewport::new(60, 24));
        assert!(contains(&fb, "SCORE"));
        assert!(contains(&fb, "150"));
        assert!(contains(&fb, "HIGH"));
        assert!(contains(&fb, "4090"));
        assert!(contains(&fb, "1000ms"));
        assert!(contains(&fb, "NEXT"));
        assert!(contains(&fb, "HOLD"));
    }

    #[test]
    fn narrow_viewport_skips_side_panel() {
        let snap = snapshot(&[PieceKind::O]);
        let fb = GameView::default().render(&snap, Viewport::new(30, 24));
        assert!(!contains(&fb, "SCORE"));
    }

    #[test]
    fn paused_overlay_lists_menu() {
        let mut snap = snapshot(&[PieceKind::O]);
        snap.paused = true;
        let fb = GameView::default().render(&snap, Viewport::new(40, 24));
        assert!(contains(&fb, "PAUSED"));
        assert!(contains(&fb, "Esc resume"));
        assert!(contains(&fb, "R restart"));
        assert!(contains(&fb, "Q quit"));
    }

    #[test]
    fn game_over_banner_shows_final_score() {
        let snap = snapshot(&[PieceKind::O]);
        let banner = Banner::GameOver { final_score: 70 };
        let fb = GameView::default().render_with_banner(&snap, Some(&banner), Viewport::new(40, 24));
        assert!(contains(&fb, "GAME OVER"));
        assert!(contains(&fb, "score 70"));
        assert!(contains(&fb, "press any key"));
        assert!(!contains(&fb, "PAUSED"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = snapshot(&[PieceKind::I]);
        let fb = GameView::default().render(&snap, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }

    #[test]
    fn score_line_formats_without_alloc() {
        let mut line = ScoreLine::default();
        assert_eq!(line.format(0), "score 0");
        assert_eq!(line.format(u32::MAX), "score 4294967295");
    }
}
