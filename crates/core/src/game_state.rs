//! Game state module - manages the complete game state
//!
//! This module ties together the arena, piece catalog, collision engine,
//! piece source and scoring. It owns the active, next and held pieces,
//! score and high score, the pause and hold flags, and the drop clock.
//!
//! # Piece Lifecycle
//!
//! `spawned -> (move / rotate / hold)* -> lock -> merge -> sweep -> spawned`
//!
//! A lock happens when a soft drop (manual or from gravity) cannot move the
//! piece down, or immediately on a hard drop. Hold is available once per
//! spawned piece.
//!
//! # Timing
//!
//! Call [`GameState::frame`] once per rendered frame with a monotonically
//! increasing timestamp in milliseconds. Elapsed time accumulates into the
//! drop counter; once it exceeds the drop interval the piece soft-drops.
//! Paused frames only move the clock forward, so resuming never sees a
//! large delta.

use crate::arena::Arena;
use crate::collision::{collide, ghost_position, merge, Position};
use crate::config::{ConfigError, GameConfig};
use crate::pieces::{create_piece, PieceMatrix};
use crate::rng::{PieceSource, UniformPieces};
use crate::scoring::drop_interval_ms;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameEvent};

/// The piece under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub matrix: PieceMatrix,
    pub pos: Position,
}

impl ActivePiece {
    pub fn collides(&self, arena: &Arena) -> bool {
        collide(arena, &self.matrix, self.pos)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S: PieceSource = UniformPieces> {
    config: GameConfig,
    arena: Arena,
    active: ActivePiece,
    next: Option<PieceMatrix>,
    hold: Option<PieceMatrix>,
    source: S,
    score: u32,
    high_score: u32,
    can_hold: bool,
    paused: bool,
    /// Milliseconds accumulated since the last automatic drop.
    drop_counter_ms: u32,
    drop_interval_ms: u32,
    /// Timestamp of the previous frame.
    last_time_ms: u64,
    events: Vec<GameEvent>,
}

impl GameState<UniformPieces> {
    /// Default configuration with a reproducible piece sequence
    pub fn with_seed(seed: u64) -> Self {
        let config = GameConfig::default();
        let arena = Arena::new(config.width, config.height);
        Self::build(config, arena, UniformPieces::seeded(seed))
    }
}

impl Default for GameState<UniformPieces> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a game and spawn its first piece. Fails if `config` is invalid.
    pub fn new(config: GameConfig, source: S) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        let arena = Arena::new(config.width, config.height);
        Ok(Self::build(config, arena, source))
    }

    /// Create a game on a pre-filled arena (puzzles, bots, tests).
    ///
    /// The arena must match the configured dimensions.
    pub fn with_arena(config: GameConfig, arena: Arena, source: S) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        if arena.width() != config.width || arena.height() != config.height {
            return Err(ConfigError::ArenaMismatch {
                expected: (config.width, config.height),
                actual: (arena.width(), arena.height()),
            });
        }
        Ok(Self::build(config, arena, source))
    }

    fn build(config: GameConfig, arena: Arena, mut source: S) -> Self {
        let first = create_piece(source.next_kind());
        let mut state = Self {
            config,
            arena,
            active: ActivePiece {
                matrix: first,
                pos: Position::default(),
            },
            // Promoted to active by the spawn below.
            next: Some(first),
            hold: None,
            source,
            score: 0,
            high_score: 0,
            can_hold: true,
            paused: false,
            drop_counter_ms: 0,
            drop_interval_ms: config.base_drop_ms,
            last_time_ms: 0,
            events: Vec::new(),
        };
        state.spawn_piece();
        state
    }

    /// Seed the high score (usually loaded from the persistent store).
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn next_piece(&self) -> Option<&PieceMatrix> {
        self.next.as_ref()
    }

    pub fn held_piece(&self) -> Option<&PieceMatrix> {
        self.hold.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn last_time_ms(&self) -> u64 {
        self.last_time_ms
    }

    /// Take every event recorded since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Where the active piece would land on a hard drop
    pub fn ghost_position(&self) -> Position {
        ghost_position(&self.arena, &self.active.matrix, self.active.pos)
    }

    /// Shift the active piece one column (`dir` is -1 or +1).
    /// Returns false, leaving the piece in place, if the target collides.
    pub fn move_horizontal(&mut self, dir: i32) -> bool {
        self.active.pos.x += dir;
        if self.active.collides(&self.arena) {
            self.active.pos.x -= dir;
            return false;
        }
        true
    }

    /// Move the active piece down one row, locking it if it cannot move.
    ///
    /// Resets the drop counter either way. Returns true if the piece moved.
    pub fn soft_drop(&mut self) -> bool {
        self.active.pos.y += 1;
        let moved = if self.active.collides(&self.arena) {
            self.active.pos.y -= 1;
            self.lock_piece();
            false
        } else {
            true
        };
        self.drop_counter_ms = 0;
        moved
    }

    /// Drop the active piece to the lowest free row and lock it.
    ///
    /// Returns the number of rows fallen.
    pub fn hard_drop(&mut self) -> u32 {
        let start_y = self.active.pos.y;
        while !self.active.collides(&self.arena) {
            self.active.pos.y += 1;
        }
        self.active.pos.y -= 1;
        let fallen = (self.active.pos.y - start_y).max(0) as u32;
        self.lock_piece();
        self.drop_counter_ms = 0;
        fallen
    }

    /// Rotate the active piece clockwise.
    ///
    /// If the rotated piece collides, horizontal kicks are applied with
    /// offsets +1, -2, +3, -4, ... (net shifts +1, -1, +2, -2, ...). The
    /// search gives up as soon as the next offset would exceed the matrix
    /// width, before the shift already applied is tested: a 3-wide piece
    /// only ever tries net +1 and -1, the 4-wide I tries +1, -1 and +2.
    /// On giving up the rotation and any shift are undone and false is
    /// returned.
    pub fn rotate(&mut self) -> bool {
        let original_x = self.active.pos.x;
        let width = self.active.matrix.size() as i32;
        self.active.matrix.rotate_cw();

        let mut offset: i32 = 1;
        while self.active.collides(&self.arena) {
            self.active.pos.x += offset;
            offset = -(offset + offset.signum());
            if offset.abs() > width {
                self.active.matrix.rotate_ccw();
                self.active.pos.x = original_x;
                log::trace!("rotation blocked at x={}", original_x);
                return false;
            }
        }
        true
    }

    /// Move the active piece into the hold slot.
    ///
    /// With an empty slot a new piece is spawned; otherwise the held piece
    /// swaps in at the spawn point (game over if it collides there). Only
    /// once per spawned piece. Returns false when hold is unavailable.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }

        match self.hold.replace(self.active.matrix) {
            None => {
                self.spawn_piece();
            }
            Some(held) => {
                self.active.matrix = held;
                self.active.pos = self.spawn_position(&held);
                if self.active.collides(&self.arena) {
                    self.game_over();
                }
            }
        }

        self.can_hold = false;
        true
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("paused={}", self.paused);
    }

    /// Start over: empty field, fresh pieces, score 0. The high score, the
    /// configuration and the frame clock are kept.
    pub fn restart(&mut self) {
        self.arena.clear();
        self.next = None;
        self.hold = None;
        self.score = 0;
        self.paused = false;
        self.drop_counter_ms = 0;
        self.drop_interval_ms = drop_interval_ms(0, &self.config);
        self.spawn_piece();
        self.events.push(GameEvent::Restarted);
        log::info!("game restarted");
    }

    /// Advance the drop clock to `now_ms` and apply gravity.
    ///
    /// Returns true if a gravity drop ran this frame.
    pub fn frame(&mut self, now_ms: u64) -> bool {
        if self.paused {
            self.resync_clock(now_ms);
            return false;
        }

        let delta = now_ms.saturating_sub(self.last_time_ms);
        self.last_time_ms = now_ms;
        self.drop_counter_ms = self
            .drop_counter_ms
            .saturating_add(u32::try_from(delta).unwrap_or(u32::MAX));

        if self.drop_counter_ms > self.drop_interval_ms {
            log::trace!(
                "gravity drop after {}ms (interval {}ms)",
                self.drop_counter_ms,
                self.drop_interval_ms
            );
            self.soft_drop();
            return true;
        }
        false
    }

    /// Record `now_ms` as the last frame time without advancing gameplay.
    pub fn resync_clock(&mut self, now_ms: u64) {
        self.last_time_ms = now_ms;
    }

    /// Apply a player action. While paused only `TogglePause` and `Restart`
    /// get through. Returns true if the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.paused && !matches!(action, GameAction::TogglePause | GameAction::Restart) {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.move_horizontal(-1),
            GameAction::MoveRight => self.move_horizontal(1),
            GameAction::SoftDrop => {
                self.soft_drop();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.rotate(),
            GameAction::Hold => self.hold(),
            GameAction::TogglePause => {
                self.toggle_pause();
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.arena.width();
        out.height = self.arena.height();
        out.field.clear();
        out.field.extend_from_slice(self.arena.cells());
        out.active = Some(ActiveSnapshot {
            matrix: self.active.matrix,
            x: self.active.pos.x,
            y: self.active.pos.y,
        });
        out.ghost_y = Some(self.ghost_position().y);
        out.next = self.next;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.paused = self.paused;
        out.score = self.score;
        out.high_score = self.high_score;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn spawn_position(&self, matrix: &PieceMatrix) -> Position {
        let x = (self.arena.width() / 2) as i32 - (matrix.size() / 2) as i32;
        Position::new(x, 0)
    }

    fn generate_piece(&mut self) -> PieceMatrix {
        create_piece(self.source.next_kind())
    }

    /// Promote the queued piece to active and queue a fresh one.
    fn spawn_piece(&mut self) {
        let matrix = match self.next.take() {
            Some(m) => m,
            None => self.generate_piece(),
        };
        self.next = Some(self.generate_piece());
        self.active = ActivePiece {
            matrix,
            pos: self.spawn_position(&matrix),
        };

        if self.active.collides(&self.arena) {
            self.game_over();
        }
        self.can_hold = true;
    }

    /// Merge, sweep, rescore and spawn the next piece.
    fn lock_piece(&mut self) {
        merge(&mut self.arena, &self.active.matrix, self.active.pos);
        let swept = self.arena.sweep();
        self.score = self.score.saturating_add(swept.points);
        log::debug!(
            "locked {:?} at ({}, {}): {} lines, +{} points",
            self.active.matrix.kind(),
            self.active.pos.x,
            self.active.pos.y,
            swept.lines,
            swept.points
        );
        self.events.push(GameEvent::Locked {
            lines_cleared: swept.lines,
            points: swept.points,
        });
        self.update_score();
        self.spawn_piece();
    }

    /// Raise the high score if beaten and recompute the drop interval.
    fn update_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore(self.high_score));
            log::info!("new high score {}", self.high_score);
        }
        self.drop_interval_ms = drop_interval_ms(self.score, &self.config);
    }

    fn game_over(&mut self) {
        let final_score = self.score;
        self.arena.clear();
        self.score = 0;
        self.events.push(GameEvent::GameOver { final_score });
        log::info!("game over with score {}", final_score);
        self.update_score();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequencePieces;
    use crate::types::{PieceKind, EMPTY};

    fn game(kinds: &[PieceKind]) -> GameState<SequencePieces> {
        GameState::new(GameConfig::default(), SequencePieces::new(kinds.to_vec())).unwrap()
    }

    fn fill_row_except(state: &mut GameState<SequencePieces>, y: i32, gaps: &[i32]) {
        let width = state.arena.width() as i32;
        for x in 0..width {
            if !gaps.contains(&x) {
                state.arena.set(x, y, 7);
            }
        }
    }

    #[test]
    fn new_game_spawns_first_piece_and_queues_next() {
        let state = game(&[PieceKind::T, PieceKind::I]);
        assert_eq!(state.active.matrix, create_piece(PieceKind::T));
        assert_eq!(state.next, Some(create_piece(PieceKind::I)));
        assert_eq!(state.hold, None);
        assert!(state.can_hold);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.drop_interval_ms, 1000);
    }

    #[test]
    fn spawn_column_centres_the_matrix() {
        assert_eq!(game(&[PieceKind::O]).active.pos, Position::new(5, 0));
        assert_eq!(game(&[PieceKind::T]).active.pos, Position::new(5, 0));
        assert_eq!(game(&[PieceKind::I]).active.pos, Position::new(4, 0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = GameConfig::with_field(0, 20);
        assert!(GameState::new(cfg, SequencePieces::repeat(PieceKind::O)).is_err());
    }

    #[test]
    fn move_horizontal_stops_at_walls() {
        let mut state = game(&[PieceKind::O]);
        for _ in 0..5 {
            assert!(state.move_horizontal(-1));
        }
        assert_eq!(state.active.pos.x, 0);
        assert!(!state.move_horizontal(-1));
        assert_eq!(state.active.pos.x, 0);

        for _ in 0..10 {
            assert!(state.move_horizontal(1));
        }
        assert_eq!(state.active.pos.x, 10);
        assert!(!state.move_horizontal(1));
    }

    #[test]
    fn soft_drop_moves_and_resets_counter() {
        let mut state = game(&[PieceKind::O]);
        state.drop_counter_ms = 500;
        assert!(state.soft_drop());
        assert_eq!(state.active.pos.y, 1);
        assert_eq!(state.drop_counter_ms, 0);
    }

    #[test]
    fn soft_drop_on_floor_locks() {
        let mut state = game(&[PieceKind::O, PieceKind::T]);
        state.active.pos.y = 18;
        assert!(!state.soft_drop());
        assert_eq!(state.arena.get(5, 18), Some(2));
        assert_eq!(state.arena.get(6, 19), Some(2));
        assert_eq!(state.active.matrix, create_piece(PieceKind::T));
        assert_eq!(state.active.pos, Position::new(5, 0));
        assert!(matches!(
            state.drain_events().next(),
            Some(GameEvent::Locked {
                lines_cleared: 0,
                points: 0
            })
        ));
    }

    #[test]
    fn hard_drop_rests_on_surface() {
        let mut state = game(&[PieceKind::O]);
        state.arena.set(5, 15, 4);
        let fallen = state.hard_drop();
        assert_eq!(fallen, 13);
        assert_eq!(state.arena.get(5, 13), Some(2));
        assert_eq!(state.arena.get(6, 14), Some(2));
        assert_eq!(state.arena.get(5, 12), Some(EMPTY));
    }

    #[test]
    fn hard_drop_completing_rows_scores() {
        let mut state = game(&[PieceKind::O]);
        fill_row_except(&mut state, 19, &[5, 6]);
        fill_row_except(&mut state, 18, &[5, 6]);
        state.hard_drop();
        assert_eq!(state.score, 30);
        assert!(state.arena.is_empty());
    }

    #[test]
    fn rotate_in_open_space() {
        let mut state = game(&[PieceKind::T]);
        state.active.pos.y = 5;
        assert!(state.rotate());
        let mut expected = create_piece(PieceKind::T);
        expected.rotate_cw();
        assert_eq!(state.active.matrix, expected);
        assert_eq!(state.active.pos, Position::new(5, 5));
    }

    #[test]
    fn rotate_kicks_off_the_left_wall() {
        // Vertical I in column 0 of the field (matrix column 2 after a
        // clockwise turn, so x = -2). Turning it horizontal needs a shift.
        let mut state = game(&[PieceKind::I]);
        state.active.matrix.rotate_cw();
        state.active.pos = Position::new(-2, 5);
        assert!(!state.active.collides(&state.arena));

        assert!(state.rotate());
        assert!(!state.active.collides(&state.arena));
        assert_eq!(state.active.pos.y, 5);
        assert!(state.active.pos.x >= 0);
    }

    #[test]
    fn rotate_kick_order_prefers_right_first() {
        let mut state = game(&[PieceKind::T]);
        state.active.pos = Position::new(3, 5);
        // The turned T's stem reaches (4, 7); block it so the first kick (+1) wins.
        state.arena.set(4, 7, 7);
        assert!(state.rotate());
        assert_eq!(state.active.pos.x, 4);
    }

    #[test]
    fn rotate_gives_up_before_second_left_kick() {
        let mut state = game(&[PieceKind::T]);
        state.active.pos = Position::new(4, 5);
        // Blocks the unshifted turn, net +1 and net -1. Net -2 is open but
        // a 3-wide piece never gets that far.
        state.arena.set(5, 6, 7);
        state.arena.set(7, 6, 7);
        let before = state.active;
        assert!(!state.rotate());
        assert_eq!(state.active, before);
    }

    #[test]
    fn rotate_gives_up_before_testing_second_right_kick() {
        let mut state = game(&[PieceKind::T]);
        state.active.pos = Position::new(4, 5);
        // Net +2 is open, but the width-3 threshold stops the search once
        // that shift has been applied and before it is tested.
        for x in [4, 5, 6] {
            state.arena.set(x, 6, 7);
        }
        let mut turned = state.active.matrix;
        turned.rotate_cw();
        assert!(!collide(&state.arena, &turned, Position::new(6, 5)));

        let before = state.active;
        assert!(!state.rotate());
        assert_eq!(state.active, before);
    }

    #[test]
    fn wide_piece_reaches_second_right_kick() {
        let mut state = game(&[PieceKind::I]);
        state.active.pos = Position::new(4, 5);
        // The vertical I lands in matrix column 2, rows 5-8. Columns 5-7 are
        // blocked at row 8, so only net +2 (column 8) fits.
        for x in [5, 6, 7] {
            state.arena.set(x, 8, 7);
        }
        assert!(state.rotate());
        assert_eq!(state.active.pos, Position::new(6, 5));

        // With column 8 blocked too, the search stops before net -2.
        let mut state = game(&[PieceKind::I]);
        state.active.pos = Position::new(4, 5);
        for x in [5, 6, 7, 8] {
            state.arena.set(x, 8, 7);
        }
        let before = state.active;
        assert!(!state.rotate());
        assert_eq!(state.active, before);
    }

    #[test]
    fn blocked_rotation_is_fully_undone() {
        let mut state = game(&[PieceKind::I]);
        state.active.pos = Position::new(4, 10);
        // The horizontal I sits in row 11; a vertical I would need rows 10-13.
        for x in 0..12 {
            for y in [10, 12, 13] {
                state.arena.set(x, y, 7);
            }
        }
        let before = state.active;
        assert!(!state.rotate());
        assert_eq!(state.active, before);
    }

    #[test]
    fn hold_with_empty_slot_spawns_next() {
        let mut state = game(&[PieceKind::T, PieceKind::I, PieceKind::O]);
        state.active.pos = Position::new(2, 7);
        state.active.matrix.rotate_cw();
        let held = state.active.matrix;

        assert!(state.hold());
        assert_eq!(state.hold, Some(held));
        assert_eq!(state.active.matrix, create_piece(PieceKind::I));
        assert_eq!(state.next, Some(create_piece(PieceKind::O)));
        assert!(!state.can_hold);
        assert!(!state.hold());
    }

    #[test]
    fn hold_swaps_and_respawns_at_top() {
        let mut state = game(&[PieceKind::T, PieceKind::I, PieceKind::O, PieceKind::S]);
        state.hold();
        state.hard_drop();
        assert!(state.can_hold);

        // Active is now O; hold holds T.
        assert_eq!(state.active.matrix, create_piece(PieceKind::O));
        state.active.pos = Position::new(1, 9);
        assert!(state.hold());
        assert_eq!(state.active.matrix, create_piece(PieceKind::T));
        assert_eq!(state.active.pos, Position::new(5, 0));
        assert_eq!(state.hold, Some(create_piece(PieceKind::O)));
        assert!(!state.can_hold);
    }

    #[test]
    fn held_piece_is_not_affected_by_rotating_active() {
        let mut state = game(&[PieceKind::L, PieceKind::L]);
        state.hold();
        let held = state.hold.unwrap();
        state.active.pos.y = 5;
        state.rotate();
        assert_eq!(state.hold, Some(held));
        assert_eq!(held, create_piece(PieceKind::L));
    }

    #[test]
    fn hold_swap_into_blocked_spawn_is_game_over() {
        let mut state = game(&[PieceKind::T, PieceKind::O, PieceKind::I]);
        state.hold();
        state.hard_drop();
        state.score = 120;
        state.high_score = 500;
        // Block the spawn area of the held T.
        state.arena.set(6, 1, 3);
        state.active.pos.y = 10;
        state.drain_events().for_each(drop);

        assert!(state.hold());
        assert!(state.arena.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 500);
        assert!(!state.can_hold);
        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(events, vec![GameEvent::GameOver { final_score: 120 }]);
    }

    #[test]
    fn blocked_spawn_is_game_over_and_play_continues() {
        let mut state = game(&[PieceKind::O]);
        state.score = 40;
        for x in 0..12 {
            if x != 0 {
                state.arena.set(x, 1, 5);
            }
        }
        // Lock the active piece somewhere harmless; the next spawn collides.
        state.active.pos = Position::new(0, 18);
        state.soft_drop();

        assert!(state.arena.is_empty());
        assert_eq!(state.score, 0);
        assert!(state.can_hold);
        assert_eq!(state.active.pos, Position::new(5, 0));
        assert!(state
            .drain_events()
            .any(|e| e == GameEvent::GameOver { final_score: 40 }));
    }

    #[test]
    fn high_score_tracks_score_and_survives_game_over() {
        let mut state = game(&[PieceKind::O]);
        fill_row_except(&mut state, 19, &[5, 6]);
        state.hard_drop();
        assert_eq!(state.high_score, 10);
        assert!(state.drain_events().any(|e| e == GameEvent::NewHighScore(10)));

        state.game_over();
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 10);
    }

    #[test]
    fn speed_follows_score_after_lock() {
        let mut state = game(&[PieceKind::O]);
        state.score = 390;
        fill_row_except(&mut state, 19, &[5, 6]);
        state.hard_drop();
        assert_eq!(state.score, 400);
        assert_eq!(state.drop_interval_ms, 800);
    }

    #[test]
    fn frame_accumulates_and_drops() {
        let mut state = game(&[PieceKind::O]);
        assert!(!state.frame(500));
        assert_eq!(state.drop_counter_ms, 500);
        assert!(!state.frame(1000));
        assert_eq!(state.drop_counter_ms, 1000);
        // Strictly greater than the interval triggers the drop.
        assert!(state.frame(1001));
        assert_eq!(state.active.pos.y, 1);
        assert_eq!(state.drop_counter_ms, 0);
    }

    #[test]
    fn paused_frames_do_not_accumulate() {
        let mut state = game(&[PieceKind::O]);
        state.frame(400);
        state.toggle_pause();
        assert!(!state.frame(10_000));
        assert!(!state.frame(60_000));
        assert_eq!(state.drop_counter_ms, 400);
        assert_eq!(state.last_time_ms, 60_000);

        state.toggle_pause();
        assert!(!state.frame(60_016));
        assert_eq!(state.drop_counter_ms, 416);
        assert_eq!(state.active.pos.y, 0);
    }

    #[test]
    fn paused_actions_are_suppressed() {
        let mut state = game(&[PieceKind::O]);
        assert!(state.apply_action(GameAction::TogglePause));
        let before = state.active;
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::Rotate,
            GameAction::Hold,
        ] {
            assert!(!state.apply_action(action));
        }
        assert_eq!(state.active, before);
        assert!(state.can_hold);
        assert!(state.apply_action(GameAction::TogglePause));
        assert!(!state.paused);
        assert!(state.apply_action(GameAction::MoveLeft));
    }

    #[test]
    fn restart_resets_everything_but_high_score() {
        let mut state = game(&[PieceKind::O, PieceKind::T]);
        state.high_score = 300;
        state.score = 250;
        state.arena.set(0, 19, 1);
        state.hold();
        state.toggle_pause();

        assert!(state.apply_action(GameAction::Restart));
        assert!(state.arena.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 300);
        assert_eq!(state.hold, None);
        assert!(state.next.is_some());
        assert!(state.can_hold);
        assert!(!state.paused);
        assert_eq!(state.drop_interval_ms, 1000);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut state = game(&[PieceKind::O, PieceKind::I]).with_high_score(99);
        state.arena.set(0, 19, 4);
        let snap = state.snapshot();
        assert_eq!((snap.width, snap.height), (12, 20));
        assert_eq!(snap.cell(0, 19), 4);
        let active = snap.active.unwrap();
        assert_eq!((active.x, active.y), (5, 0));
        assert_eq!(snap.ghost_y, Some(18));
        assert_eq!(snap.next, Some(create_piece(PieceKind::I)));
        assert_eq!(snap.high_score, 99);
        assert_eq!(snap.drop_interval_ms, 1000);
    }
}
