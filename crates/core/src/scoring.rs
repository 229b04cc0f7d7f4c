//! Scoring module - line clear points, levels and gravity speed
//!
//! - Clearing 1/2/3/4 rows in one lock awards 100/300/500/800 points times the level.
//! - The level is `lines / 10 + 1`.
//! - Gravity starts at 1000ms per row and speeds up by 100ms per level, never
//!   dropping below 50ms.

use crate::types::{
    BASE_FALL_INTERVAL_MS, FALL_INTERVAL_MIN_MS, FALL_INTERVAL_STEP_MS, LINES_PER_LEVEL,
    LINE_SCORES, START_LEVEL,
};

/// Points for clearing `lines` rows in a single lock at `level` (1-based)
///
/// Anything outside 1..=4 rows scores nothing.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Level management
/// Level increases every 10 lines cleared, starting at 1
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + START_LEVEL
}

/// Get fall interval for a level (in milliseconds)
pub fn fall_interval_ms(level: u32) -> u32 {
    let speedup = level
        .saturating_sub(START_LEVEL)
        .saturating_mul(FALL_INTERVAL_STEP_MS);
    BASE_FALL_INTERVAL_MS
        .saturating_sub(speedup)
        .max(FALL_INTERVAL_MIN_MS)
}
