//! Level and power curves.
//!
//! Leveling is always derived forward from experience: a member's level is
//! never stored as independent state, only cached by `Member::update_stats`.
//! The experience thresholds here are reporting helpers for progress bars.

/// Level reached with `exp` experience on a curve of steepness `level_index`.
///
/// `level = floor(exp ^ level_index)`. Experience below 1 is treated as 1.
pub fn level_from_experience(exp: u64, level_index: f64) -> u64 {
    let exp = exp.max(1) as f64;
    exp.powf(level_index).floor() as u64
}

/// Minimum experience that reaches `level + 1`.
///
/// `floor((level + 1) ^ (1 / level_index)) + 1`
pub fn exp_required_for_level(level: u64, level_index: f64) -> u64 {
    let next = (level + 1) as f64;
    next.powf(1.0 / level_index).floor() as u64 + 1
}

/// Experience at which `level` starts, for the low end of a progress bar.
///
/// `ceil(level ^ (1 / level_index))`, never below 1.
pub fn exp_for_current_level(level: u64, level_index: f64) -> u64 {
    ((level as f64).powf(1.0 / level_index).ceil() as u64).max(1)
}

/// Base power at `level`: `floor(level² × 0.5 + 1)`.
pub fn base_power(level: u64) -> u64 {
    let level = level as f64;
    (level * level * 0.5 + 1.0).floor() as u64
}

/// Rounds to two decimal places with a fixed decimal scale.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
