//! Core game logic - deterministic and free of I/O
//!
//! This crate contains the game rules, state management and the frame-driven
//! update loop. It does no terminal or file I/O; persistence and rendering
//! react to the [`GameEvent`](types::GameEvent)s and [`GameSnapshot`]s it
//! produces.
//!
//! # Module Structure
//!
//! - [`arena`]: row-major playfield with row removal and sweeping
//! - [`collision`]: overlap test, merge, and landing position
//! - [`config`]: field size and speed curve, validated up front
//! - [`game_state`]: active/next/held pieces, score, pause, drop clock
//! - [`pieces`]: the seven piece matrices and their rotation
//! - [`rng`]: where new pieces come from
//! - [`scoring`]: line-clear points and drop interval
//! - [`snapshot`]: render-ready copy of the state
//!
//! # Rules
//!
//! - Pieces spawn centred in the top row, chosen uniformly at random
//! - Rotation is clockwise only, with a simple alternating horizontal kick
//! - Every full row is removed; the n-th row in one lock scores `10 * 2^(n-1)`
//! - The drop interval shortens by 100ms per 200 points, down to 100ms
//! - Hold swaps the active piece once per spawned piece
//! - A spawn that collides ends the game: the field is wiped and score reset
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState, SequencePieces};
//! use blockfall_types::{GameAction, PieceKind};
//!
//! let source = SequencePieces::repeat(PieceKind::O);
//! let mut game = GameState::new(GameConfig::default(), source).unwrap();
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The O landed on the floor one column left of spawn.
//! assert_eq!(game.arena().get(4, 19), Some(2));
//! ```
//!
//! # Timing
//!
//! Call [`GameState::frame`] once per rendered frame with a monotonic
//! timestamp in milliseconds.

pub mod arena;
pub mod collision;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use arena::{Arena, SweepResult};
pub use collision::{collide, ghost_position, merge, Position};
pub use config::{ConfigError, GameConfig};
pub use game_state::{ActivePiece, GameState};
pub use pieces::{create_piece, PieceMatrix};
pub use rng::{PieceSource, SequencePieces, UniformPieces};
pub use scoring::{drop_interval_ms, line_clear_points};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
