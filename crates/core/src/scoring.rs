//! Scoring module - clear rewards, levels and turn timing
//!
//! A clear pays `lines * blocks * 10 * multiplier`, where `blocks` counts the
//! distinct cleared cells over all lines. Clearing several lines at once is
//! therefore rewarded super-linearly. The multiplier has already been bumped
//! for the clear being scored.

use std::time::Duration;

use crate::types::{
    BASE_TURN_MS, MIN_TURN_MS, POINTS_PER_BLOCK, SCORE_PER_LEVEL, STARTING_MULTIPLIER,
    TURN_STEP_MS,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub lines: usize,
    pub blocks: usize,
    /// Multiplier after this placement was accounted for
    pub multiplier: u32,
    pub points: u64,
}

/// Points for clearing `lines` lines made of `blocks` distinct blocks
pub fn calculate_clear_score(lines: usize, blocks: usize, multiplier: u32) -> u64 {
    (lines as u64)
        .saturating_mul(blocks as u64)
        .saturating_mul(POINTS_PER_BLOCK)
        .saturating_mul(multiplier as u64)
}

/// Multiplier after a placement that did (or did not) clear anything
pub fn next_multiplier(current: u32, cleared: bool) -> u32 {
    if cleared {
        current.saturating_add(1)
    } else {
        STARTING_MULTIPLIER
    }
}

/// Score a placement: bump or reset the multiplier, then price the clear
///
/// # Examples
///
/// ```
/// use block_grid_core::calculate_score;
///
/// // One full row of five on a 5x5 board, multiplier 1 before the clear.
/// let result = calculate_score(1, 5, 1);
/// assert_eq!(result.multiplier, 2);
/// assert_eq!(result.points, 100);
/// ```
pub fn calculate_score(lines: usize, blocks: usize, multiplier: u32) -> ScoreResult {
    let multiplier = next_multiplier(multiplier, lines > 0);
    ScoreResult {
        lines,
        blocks,
        multiplier,
        points: calculate_clear_score(lines, blocks, multiplier),
    }
}

/// Level reached with `score` points
pub fn level_for_score(score: u64) -> u32 {
    (score / SCORE_PER_LEVEL).min(u32::MAX as u64) as u32
}

/// Turn length in milliseconds: 12s minus half a second per level, never below 2.5s
pub fn turn_duration_ms(level: u32) -> u32 {
    let reduction = level.saturating_mul(TURN_STEP_MS);
    BASE_TURN_MS.saturating_sub(reduction).max(MIN_TURN_MS)
}

/// Turn length as a `Duration`
pub fn turn_duration(level: u32) -> Duration {
    Duration::from_millis(turn_duration_ms(level) as u64)
}
