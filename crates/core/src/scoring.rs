//! Scoring module - line clears, T-spins, combos and leveling
//!
//! Rules:
//! - T-spin locks use the T-spin table instead of the line table (never both).
//! - Combo bonus is `combo_base * combo_index * level`, where `combo_index`
//!   counts consecutive clearing locks starting at 0.
//! - All point values are scaled by the level the lock happened at.

use crate::config::RulesConfig;

/// Points for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Line-clear or T-spin points (already scaled by level)
    pub base: u32,
    pub combo_bonus: u32,
    pub total: u32,
}

/// Look up `table[index]`, clamping the index to the last entry.
fn clamped(table: &[u32], index: usize) -> u32 {
    match table.get(index) {
        Some(&points) => points,
        None => table.last().copied().unwrap_or(0),
    }
}

/// Base points for clearing `lines` rows at `level`
pub fn calculate_line_score(config: &RulesConfig, lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    clamped(&config.line_scores, lines).saturating_mul(level)
}

/// T-spin points for `lines` rows (0 included) at `level`
pub fn calculate_tspin_score(config: &RulesConfig, lines: usize, level: u32) -> u32 {
    clamped(&config.tspin_scores, lines).saturating_mul(level)
}

/// Calculate combo bonus.
///
/// `combo_index` semantics:
/// - `-1`: no combo chain
/// - `0`: first clear in chain (no bonus)
/// - `1+`: bonus applies as `combo_base * combo_index * level`
pub fn calculate_combo_bonus(config: &RulesConfig, combo_index: i32, level: u32) -> u32 {
    if combo_index <= 0 {
        return 0;
    }
    config
        .combo_base
        .saturating_mul(combo_index as u32)
        .saturating_mul(level)
}

/// Score a lock. `combo_index` is the value after this lock updated it.
pub fn calculate_score(
    config: &RulesConfig,
    lines: usize,
    level: u32,
    tspin: bool,
    combo_index: i32,
) -> ScoreResult {
    let base = if tspin {
        calculate_tspin_score(config, lines, level)
    } else {
        calculate_line_score(config, lines, level)
    };
    let combo_bonus = if lines > 0 {
        calculate_combo_bonus(config, combo_index, level)
    } else {
        0
    };

    ScoreResult {
        base,
        combo_bonus,
        total: base.saturating_add(combo_bonus),
    }
}

/// Drop score: `cells * points_per_cell`
pub fn calculate_drop_score(cells: u32, points_per_cell: u32) -> u32 {
    cells.saturating_mul(points_per_cell)
}

/// Level for a total line count: starts at 1, one more per `lines_per_level`,
/// capped at the length of the speed table.
pub fn calculate_level(config: &RulesConfig, total_lines: u32) -> u32 {
    let level = 1 + total_lines / config.lines_per_level.max(1);
    level.min(config.max_level().max(1))
}

/// Fall threshold for a level (1-based)
pub fn fall_interval_ms(config: &RulesConfig, level: u32) -> u32 {
    clamped(&config.fall_speeds_ms, level.saturating_sub(1) as usize)
}
