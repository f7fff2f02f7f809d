//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into a
//! framebuffer of styled cells, and the renderer flushes that framebuffer to
//! the terminal, rewriting only what changed since the last frame.
//!
//! Each field cell is 2 terminal columns wide by default to compensate for
//! the usual glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, Banner, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
