//! Party-level reductions over member stats.
//!
//! Inactive members are skipped entirely: they add nothing to strength or
//! effectiveness and are not counted as active or strong.

use crate::character::member::Member;
use crate::core::constants::{
    EFFECTIVENESS_WEIGHTS, STAMINA_LOW_BAND_MAX, STAMINA_LOW_MODIFIER, STAMINA_MID_BAND_MAX,
    STAMINA_MID_MODIFIER,
};
use serde::{Deserialize, Serialize};

/// Production factor for a stamina value. Stepwise bands:
/// 0 → 0.0, 1–25 → 0.25, 26–50 → 0.5, above 50 → 1.0.
pub fn stamina_modifier(stamina: u8) -> f64 {
    match stamina {
        0 => 0.0,
        s if s <= STAMINA_LOW_BAND_MAX => STAMINA_LOW_MODIFIER,
        s if s <= STAMINA_MID_BAND_MAX => STAMINA_MID_MODIFIER,
        _ => 1.0,
    }
}

/// Sum of `strength × stamina_modifier` over active members.
pub fn party_strength(members: &[Member]) -> f64 {
    members
        .iter()
        .filter(|m| m.active)
        .map(|m| m.strength() as f64 * stamina_modifier(m.stamina()))
        .sum()
}

/// Stamina-weighted stat sums for a group of members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatEffectiveness {
    pub strength: f64,
    pub speed: f64,
    pub magic: f64,
    /// `strength × 1.0 + speed × 0.8 + magic × 0.6`
    pub effective_total: f64,
}

pub fn combat_effectiveness(members: &[Member]) -> CombatEffectiveness {
    let mut result = CombatEffectiveness::default();
    for member in members.iter().filter(|m| m.active) {
        let modifier = stamina_modifier(member.stamina());
        result.strength += member.strength() as f64 * modifier;
        result.speed += member.speed() as f64 * modifier;
        result.magic += member.magic() as f64 * modifier;
    }

    let (w_str, w_spd, w_mag) = EFFECTIVENESS_WEIGHTS;
    result.effective_total = result.strength * w_str + result.speed * w_spd + result.magic * w_mag;
    result
}

pub fn count_active(members: &[Member]) -> usize {
    members.iter().filter(|m| m.active).count()
}

/// Active members whose strength exceeds `difficulty`.
pub fn count_strong(members: &[Member], difficulty: u64) -> usize {
    members
        .iter()
        .filter(|m| m.active && m.strength() > difficulty)
        .count()
}
