//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every key
//! press produces at most one action; there is no auto-repeat handling beyond
//! what the terminal itself sends.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_press, should_quit};
