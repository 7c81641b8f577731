//! Scoring module - line-clear points, level progression and fall speed
//!
//! Rules:
//! - A commit that clears `n` lines awards `n * 100 * level`, using the level
//!   in effect before the clear. Points are awarded once per commit.
//! - The level is `score / 1000 + 1` and never decreases.
//! - The fall interval is `1000ms - (level - 1) * 100ms`, floored at 500ms.

use crate::types::{BASE_FALL_MS, FALL_STEP_MS, MIN_FALL_MS, POINTS_PER_LEVEL, POINTS_PER_LINE};

/// Points for clearing `lines` rows in one commit at `level`
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    lines.saturating_mul(POINTS_PER_LINE).saturating_mul(level)
}

/// Level reached at `score`
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Fall interval in milliseconds at `level`
pub fn fall_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(FALL_STEP_MS);
    BASE_FALL_MS.saturating_sub(reduction).max(MIN_FALL_MS)
}

/// What changed after applying a clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsChange {
    pub points: u32,
    pub score_changed: bool,
    pub level_changed: bool,
}

/// Running game statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub blocks_placed: u32,
}

impl GameStats {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines_cleared: 0,
            blocks_placed: 0,
        }
    }

    /// Account for a commit that cleared `lines` rows
    pub fn apply_clear(&mut self, lines: u32) -> StatsChange {
        if lines == 0 {
            return StatsChange::default();
        }

        let points = line_clear_points(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines_cleared = self.lines_cleared.saturating_add(lines);

        let new_level = level_for_score(self.score);
        let level_changed = new_level > self.level;
        if level_changed {
            self.level = new_level;
        }

        StatsChange {
            points,
            score_changed: points > 0,
            level_changed,
        }
    }

    /// Current fall interval
    pub fn fall_interval_ms(&self) -> u32 {
        fall_interval_ms(self.level)
    }
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}
