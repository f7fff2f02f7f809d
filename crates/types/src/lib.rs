//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no I/O, so they can be used by the core
//! simulation, the terminal renderer and the input mapping alike.
//!
//! # Playfield Dimensions
//!
//! The default playfield is 12 columns by 20 rows. Dimensions are
//! configuration, not a hard limit; see `GameConfig` in the core crate.
//!
//! # Cell Values
//!
//! Every playfield and piece cell is a small integer:
//!
//! | Value | Meaning |
//! |-------|---------|
//! | 0 | empty |
//! | 1 | T |
//! | 2 | O |
//! | 3 | L |
//! | 4 | J |
//! | 5 | I |
//! | 6 | S |
//! | 7 | Z |
//!
//! # Speed Curve Defaults
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Drop interval at score 0 |
//! | `MIN_DROP_MS` | 100 | Drop interval floor |
//! | `SPEED_STEP_SCORE` | 200 | Score needed per speed step |
//! | `SPEED_STEP_MS` | 100 | Interval reduction per step |
//! | `FRAME_MS` | 16 | Frame pacing used by the terminal runner |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.cell_value(), 1);
//! assert_eq!(PieceKind::from_cell(5), Some(PieceKind::I));
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(DEFAULT_FIELD_WIDTH, 12);
//! assert_eq!(DEFAULT_FIELD_HEIGHT, 20);
//! ```

/// Default playfield width in cells
pub const DEFAULT_FIELD_WIDTH: usize = 12;

/// Default playfield height in cells
pub const DEFAULT_FIELD_HEIGHT: usize = 20;

/// Smallest accepted playfield dimension; the largest piece matrix is 4x4.
pub const MIN_FIELD_DIM: usize = 4;

/// Largest piece matrix side length
pub const MAX_PIECE_SIZE: usize = 4;

/// Drop interval at score 0
pub const BASE_DROP_MS: u32 = 1000;

/// Drop interval floor
pub const MIN_DROP_MS: u32 = 100;

/// Score needed for each speed step
pub const SPEED_STEP_SCORE: u32 = 200;

/// Drop interval reduction per speed step
pub const SPEED_STEP_MS: u32 = 100;

/// Points for the first row cleared by one lock; each further row doubles.
pub const LINE_CLEAR_BASE_POINTS: u32 = 10;

/// Frame pacing for the terminal runner (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// A single playfield or piece cell. `0` is empty, `1..=7` identify a piece kind.
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;


/// The seven piece kinds
///
/// Declared in cell-value order, so `kind as u8 + 1` is the colour index
/// stored in the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    O,
    L,
    J,
    I,
    S,
    Z,
}

impl PieceKind {
    /// Every kind, in cell-value order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in previews
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "T",
            PieceKind::O => "O",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::I => "I",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }

    /// Non-zero cell value written into the playfield for this kind
    pub fn cell_value(&self) -> Cell {
        *self as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_value`]; `None` for empty or unknown values
    pub fn from_cell(cell: Cell) -> Option<Self> {
        match cell {
            1..=7 => Some(Self::ALL[(cell - 1) as usize]),
            _ => None,
        }
    }
}

/// Discrete player actions
///
/// These are produced by the input layer (or a bot) and applied to the game
/// state. While paused, everything except `TogglePause` and the pause-menu
/// `Restart` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell, locking it if it cannot move
    SoftDrop,
    /// Drop piece to the lowest free row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise with horizontal kicks
    Rotate,
    /// Swap the active piece with the hold slot (once per piece)
    Hold,
    /// Pause or resume gameplay
    TogglePause,
    /// Start a fresh game, keeping the high score
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("togglepause"), Some(GameAction::TogglePause));
    /// assert_eq!(GameAction::from_str("fly"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "togglepause" => Some(GameAction::TogglePause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
        }
    }
}

/// Notable state changes recorded by the game state for observers.
///
/// The terminal runner drains these after every input and frame: it saves
/// new high scores and shows the game-over banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece merged into the playfield.
    Locked { lines_cleared: u32, points: u32 },
    /// The live score passed the stored high score.
    NewHighScore(u32),
    /// A spawn or hold swap collided; field and score were reset.
    GameOver { final_score: u32 },
    /// The game was re-initialised on request.
    Restarted,
}
