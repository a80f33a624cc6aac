//! Scoring module - line clear points, drop bonuses, leveling and gravity
//!
//! Classic scoring: the base value for the number of lines cleared at once,
//! multiplied by the current level (levels start at 1). There are no T-spin,
//! combo or back-to-back bonuses.

use crate::types::{
    HARD_DROP_POINTS, LEVEL_SPEEDS_MS, LINES_PER_LEVEL, LINE_CLEAR_POINTS, MAX_LEVEL,
    SOFT_DROP_POINTS,
};

/// Points for clearing `lines` rows at `level`.
/// Counts outside 1..=4 score nothing.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    match LINE_CLEAR_POINTS.get(lines) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Points for a soft drop of `cells` rows
pub fn soft_drop_points(cells: u32) -> u32 {
    cells.saturating_mul(SOFT_DROP_POINTS)
}

/// Points for a hard drop of `cells` rows
pub fn hard_drop_points(cells: u32) -> u32 {
    cells.saturating_mul(HARD_DROP_POINTS)
}

/// Level reached after `total_lines` cleared lines, in 1..=10
pub fn level_for_lines(total_lines: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL + 1).clamp(1, MAX_LEVEL)
}

/// Gravity interval for a level in milliseconds.
///
/// Level 1 maps to the first table entry; levels at or below 0 clamp to the
/// first entry and levels above 10 to the last.
///
/// ```
/// use blockfall_core::scoring::get_drop_interval_ms;
///
/// assert_eq!(get_drop_interval_ms(1), 1000);
/// assert_eq!(get_drop_interval_ms(10), 64);
/// assert_eq!(get_drop_interval_ms(0), 1000);
/// assert_eq!(get_drop_interval_ms(42), 64);
/// ```
pub fn get_drop_interval_ms(level: i32) -> u32 {
    let last = LEVEL_SPEEDS_MS.len() - 1;
    let idx = if level <= 0 {
        0
    } else {
        ((level - 1) as usize).min(last)
    };
    LEVEL_SPEEDS_MS[idx]
}
