use super::attributes::{AttributeKind, AttributeMultipliers, StatModifiers};
use serde::{Deserialize, Serialize};

/// How a member's base power is split. Strength takes whatever speed and
/// magic leave over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PowerDistribution {
    pub speed: f64,
    pub magic: f64,
}

impl PowerDistribution {
    pub fn new(speed: f64, magic: f64) -> Self {
        Self { speed, magic }
    }

    /// Returns true when both shares are finite, within [0, 1], and sum to at
    /// most 1.
    pub fn is_valid(&self) -> bool {
        let in_range = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        in_range(self.speed) && in_range(self.magic) && self.speed + self.magic <= 1.0
    }

    /// Clamps each share to [0, 1] and, if the sum exceeds 1, rescales both so
    /// it is exactly 1.
    pub fn normalized(&self) -> Self {
        let clamp = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        let speed = clamp(self.speed);
        let magic = clamp(self.magic);
        let total = speed + magic;
        if total > 1.0 {
            Self::new(speed / total, magic / total)
        } else {
            Self::new(speed, magic)
        }
    }

    pub fn strength(&self) -> f64 {
        1.0 - (self.speed + self.magic)
    }

    pub fn share(&self, kind: AttributeKind) -> f64 {
        match kind {
            AttributeKind::Strength => self.strength(),
            AttributeKind::Speed => self.speed,
            AttributeKind::Magic => self.magic,
        }
    }
}

impl Default for PowerDistribution {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DerivedStats {
    pub strength: u64,
    pub speed: u64,
    pub magic: u64,
}

impl DerivedStats {
    /// Splits `base_power` across the three stats.
    ///
    /// Each stat is `floor(base_power × share × attribute × mult + add)`,
    /// floored independently and never below zero.
    pub fn calculate(
        base_power: u64,
        distribution: &PowerDistribution,
        attributes: &AttributeMultipliers,
        modifiers: &StatModifiers,
    ) -> Self {
        let shares = distribution.normalized();
        let stat = |kind: AttributeKind| {
            let value = base_power as f64
                * shares.share(kind)
                * attributes.get(kind)
                * modifiers.mult(kind)
                + modifiers.add(kind);
            value.max(0.0).floor() as u64
        };

        Self {
            strength: stat(AttributeKind::Strength),
            speed: stat(AttributeKind::Speed),
            magic: stat(AttributeKind::Magic),
        }
    }

    pub fn get(&self, kind: AttributeKind) -> u64 {
        match kind {
            AttributeKind::Strength => self.strength,
            AttributeKind::Speed => self.speed,
            AttributeKind::Magic => self.magic,
        }
    }

    pub fn total(&self) -> u64 {
        self.strength + self.speed + self.magic
    }
}
