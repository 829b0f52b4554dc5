//! Scoring, leveling and gravity tables
//!
//! Classic NES rules: line clears award a base value times (level + 1),
//! soft-dropped cells bank one point each, and the level advances every
//! ten lines past a start-level-dependent threshold.

use crate::types::{LINE_SCORES, SOFT_DROP_POINTS};

/// Frames per gravity cell for levels 0..=29; level 29 and above drop
/// every frame.
const GRAVITY_TABLE: [u32; 30] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, // 0-9
    5, 5, 5, 4, 4, 4, 3, 3, 3, // 10-18
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, // 19-28
    1, // 29
];

/// Points for clearing `lines` simultaneously at `level`. Zero lines
/// score zero; more than four cannot happen.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines] * (level + 1)
}

/// The full score delta applied at lock time.
pub fn score_delta(lines: usize, level: u32, soft_drop_cells: u32) -> u32 {
    line_clear_score(lines, level) + soft_drop_cells * SOFT_DROP_POINTS
}

/// Current level given the starting level and total cleared lines.
///
/// The first level-up happens at a threshold of `start * 10 + 10` lines,
/// or `max(100, start * 10 - 50)` for starts of 10 and above; every ten
/// lines after that is another level.
pub fn level_for(start_level: u32, total_lines: u32) -> u32 {
    let threshold = if start_level >= 10 {
        (start_level * 10 - 50).max(100)
    } else {
        start_level * 10 + 10
    };
    if total_lines >= threshold {
        start_level + (total_lines - threshold) / 10 + 1
    } else {
        start_level
    }
}

/// Frames the gravity counter must reach before the piece falls one cell.
pub fn gravity_frames(level: u32) -> u32 {
    GRAVITY_TABLE[(level as usize).min(GRAVITY_TABLE.len() - 1)]
}

/// Soft-drop threshold: a tenth of gravity, floored. Zero means a forced
/// drop on every frame.
pub fn soft_drop_frames(level: u32) -> u32 {
    gravity_frames(level) / 10
}
