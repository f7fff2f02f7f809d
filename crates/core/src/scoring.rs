//! Scoring module - line-clear points and the score-driven speed curve
//!
//! # Line Clears
//!
//! Within one lock, the n-th cleared row is worth `10 * 2^(n-1)`:
//!
//! | Rows cleared | Points |
//! |--------------|--------|
//! | 1 | 10 |
//! | 2 | 10 + 20 = 30 |
//! | 3 | 30 + 40 = 70 |
//! | 4 | 70 + 80 = 150 |
//!
//! # Speed
//!
//! The drop interval shrinks by `speed_step_ms` for every `speed_step_score`
//! points, down to `min_drop_ms`:
//! `max(min, base - floor(score / step_score) * step_ms)`.

use crate::config::GameConfig;
use crate::types::LINE_CLEAR_BASE_POINTS;

/// Points for the `nth` row (1-based) cleared by a single lock
pub fn line_clear_points(nth: u32) -> u32 {
    if nth == 0 {
        return 0;
    }
    let multiplier = 1u32.checked_shl(nth - 1).unwrap_or(u32::MAX);
    LINE_CLEAR_BASE_POINTS.saturating_mul(multiplier)
}

/// Drop interval in milliseconds for the given score
pub fn drop_interval_ms(score: u32, config: &GameConfig) -> u32 {
    let steps = score / config.speed_step_score.max(1);
    let reduction = steps.saturating_mul(config.speed_step_ms);
    config
        .base_drop_ms
        .saturating_sub(reduction)
        .max(config.min_drop_ms)
}
