//! Party members and the single stat recomputation path.
//!
//! Level, base power, the next-level threshold and strength/speed/magic are
//! cached on the member but can only be written by [`Member::update_stats`].
//! Every mutator that touches an input (experience, power distribution,
//! attribute multipliers, equipment modifiers) ends by calling it, so the
//! cached values always equal `DerivedStats::calculate` of the current inputs.

use super::archetypes::Archetype;
use super::attributes::{AttributeKind, AttributeMultipliers, MemberClass, StatModifiers};
use super::derived_stats::{DerivedStats, PowerDistribution};
use super::progression::{
    base_power, exp_for_current_level, exp_required_for_level, level_from_experience, round2,
};
use crate::core::constants::{DISMISS_ATTRIBUTE_WEIGHTS, DISMISS_EXP_EXPONENT, MAX_STAMINA};
use serde::{Deserialize, Serialize};

/// Refusals from member-level mutations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemberError {
    #[error("speed share {speed} and magic share {magic} must each be in [0, 1] and sum to at most 1")]
    InvalidDistribution { speed: f64, magic: f64 },

    #[error("attribute increase must be a non-negative amount, got {0}")]
    InvalidAttributeAmount(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub archetype: String,
    /// 0 = common .. 3 = legendary
    pub rarity: u8,
    /// Inactive members are left out of every party aggregate.
    pub active: bool,
    /// Inventory instance id of the equipped item, if any.
    pub equipment: Option<String>,

    experience: u64,
    level_index: f64,
    distribution: PowerDistribution,
    attributes: AttributeMultipliers,
    modifiers: StatModifiers,
    stamina: u8,

    // Cached, owned by update_stats
    level: u64,
    base_power: u64,
    next_level_exp: u64,
    stats: DerivedStats,
}

impl Member {
    /// Creates a fresh level-1 member from an archetype.
    pub fn new(id: String, archetype: &Archetype) -> Self {
        let mut member = Self {
            id,
            name: archetype.name.to_string(),
            archetype: archetype.key.to_string(),
            rarity: archetype.rarity,
            active: true,
            equipment: None,
            experience: 1,
            level_index: archetype.level_index,
            distribution: archetype.distribution,
            attributes: archetype.attributes,
            modifiers: StatModifiers::default(),
            stamina: MAX_STAMINA,
            level: 0,
            base_power: 0,
            next_level_exp: 0,
            stats: DerivedStats::default(),
        };
        member.update_stats();
        member
    }

    /// Creates a member with a random v4 UUID.
    pub fn spawn(archetype: &Archetype) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), archetype)
    }

    /// Recomputes level, base power, next-level threshold and derived stats.
    ///
    /// This is the only place cached progression fields are written.
    pub fn update_stats(&mut self) {
        self.experience = self.experience.max(1);
        self.level = level_from_experience(self.experience, self.level_index);
        self.base_power = base_power(self.level);
        self.stats = DerivedStats::calculate(
            self.base_power,
            &self.distribution,
            &self.attributes,
            &self.modifiers,
        );
        self.next_level_exp = exp_required_for_level(self.level, self.level_index);
    }

    /// Normalizes fields that may have drifted in a stored record, then
    /// recomputes. Stored derived fields are never trusted.
    pub fn rehydrate(&mut self) {
        self.stamina = self.stamina.min(MAX_STAMINA);
        if !self.distribution.is_valid() {
            self.distribution = self.distribution.normalized();
        }
        self.update_stats();
    }

    // ── Mutators ────────────────────────────────────────────────

    /// Adds experience. A zero grant is a no-op and returns false.
    pub fn grant_experience(&mut self, amount: u64) -> bool {
        if amount == 0 {
            return false;
        }
        self.experience = self.experience.saturating_add(amount);
        self.update_stats();
        true
    }

    /// Replaces the power distribution. Refused when a share is outside
    /// [0, 1] or the two sum above 1.
    pub fn set_distribution(&mut self, speed: f64, magic: f64) -> Result<(), MemberError> {
        let distribution = PowerDistribution::new(speed, magic);
        if !distribution.is_valid() {
            return Err(MemberError::InvalidDistribution { speed, magic });
        }
        self.distribution = distribution;
        self.update_stats();
        Ok(())
    }

    /// Raises one attribute multiplier, rounded to two decimals.
    pub fn increase_attribute(
        &mut self,
        kind: AttributeKind,
        amount: f64,
    ) -> Result<(), MemberError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(MemberError::InvalidAttributeAmount(amount));
        }
        let value = round2(self.attributes.get(kind) + amount);
        self.attributes.set(kind, value);
        self.update_stats();
        Ok(())
    }

    /// Multiplies every attribute by its factor, rounding each to two decimals.
    pub(crate) fn scale_attributes(&mut self, factors: [f64; 3]) {
        for kind in AttributeKind::all() {
            let value = round2(self.attributes.get(kind) * factors[kind.index()]);
            self.attributes.set(kind, value);
        }
        self.update_stats();
    }

    /// Replaces the equipment modifiers.
    pub fn set_modifiers(&mut self, modifiers: StatModifiers) {
        self.modifiers = modifiers;
        self.update_stats();
    }

    /// Adds (or removes) stamina, clamped to [0, 100].
    pub fn add_stamina(&mut self, amount: i32) {
        let value = (self.stamina as i32 + amount).clamp(0, MAX_STAMINA as i32);
        self.stamina = value as u8;
    }

    pub fn set_stamina(&mut self, value: i32) {
        self.stamina = value.clamp(0, MAX_STAMINA as i32) as u8;
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn level_index(&self) -> f64 {
        self.level_index
    }

    pub fn level(&self) -> u64 {
        self.level
    }

    pub fn base_power(&self) -> u64 {
        self.base_power
    }

    /// Experience needed to reach the next level.
    pub fn next_level_exp(&self) -> u64 {
        self.next_level_exp
    }

    /// Experience at which the current level began.
    pub fn current_level_exp(&self) -> u64 {
        exp_for_current_level(self.level, self.level_index)
    }

    pub fn distribution(&self) -> PowerDistribution {
        self.distribution
    }

    pub fn attributes(&self) -> AttributeMultipliers {
        self.attributes
    }

    pub fn modifiers(&self) -> StatModifiers {
        self.modifiers
    }

    pub fn stats(&self) -> DerivedStats {
        self.stats
    }

    pub fn strength(&self) -> u64 {
        self.stats.strength
    }

    pub fn speed(&self) -> u64 {
        self.stats.speed
    }

    pub fn magic(&self) -> u64 {
        self.stats.magic
    }

    pub fn stamina(&self) -> u8 {
        self.stamina
    }

    pub fn is_equipped(&self) -> bool {
        self.equipment.is_some()
    }

    pub fn class(&self) -> MemberClass {
        MemberClass::classify(
            &self.attributes,
            self.distribution.speed,
            self.distribution.magic,
        )
    }

    /// Gold paid out when this member is dismissed.
    pub fn gold_value(&self) -> u64 {
        let base = (self.experience as f64).powf(DISMISS_EXP_EXPONENT).floor();
        let (w_str, w_spd, w_mag) = DISMISS_ATTRIBUTE_WEIGHTS;
        let weighted = self.attributes.get(AttributeKind::Strength) * w_str
            + self.attributes.get(AttributeKind::Speed) * w_spd
            + self.attributes.get(AttributeKind::Magic) * w_mag;
        (base * weighted).floor() as u64
    }

    /// True when the cached stats match a fresh calculation from the inputs.
    pub fn stats_are_current(&self) -> bool {
        let level = level_from_experience(self.experience, self.level_index);
        let power = base_power(level);
        self.level == level
            && self.base_power == power
            && self.stats
                == DerivedStats::calculate(
                    power,
                    &self.distribution,
                    &self.attributes,
                    &self.modifiers,
                )
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::super::archetypes::Archetype;
    use super::super::attributes::AttributeMultipliers;
    use super::super::derived_stats::PowerDistribution;
    use super::Member;

    /// Archetype with square-root growth so `exp = level²` lands exactly on a level.
    pub fn linear_archetype(speed: f64, magic: f64, attrs: (f64, f64, f64)) -> Archetype {
        Archetype {
            key: "test",
            name: "Tester",
            rarity: 0,
            level_index: 0.5,
            attributes: AttributeMultipliers::new(attrs.0, attrs.1, attrs.2),
            distribution: PowerDistribution::new(speed, magic),
        }
    }

    /// Pure-strength member at `level` (strength equals base power).
    pub fn member_at_level(id: &str, level: u64) -> Member {
        let mut member = Member::new(id.to_string(), &linear_archetype(0.0, 0.0, (1.0, 1.0, 1.0)));
        member.grant_experience(level * level - 1);
        member
    }
}
