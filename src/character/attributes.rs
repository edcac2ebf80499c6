use crate::core::constants::{CLASS_BATTLE_MAGE_MIN_STRENGTH_WEIGHT, CLASS_SECONDARY_THRESHOLD};
use serde::{Deserialize, Serialize};

pub const NUM_STATS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Strength,
    Speed,
    Magic,
}

impl AttributeKind {
    pub fn all() -> [AttributeKind; NUM_STATS] {
        [
            AttributeKind::Strength,
            AttributeKind::Speed,
            AttributeKind::Magic,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            AttributeKind::Strength => 0,
            AttributeKind::Speed => 1,
            AttributeKind::Magic => 2,
        }
    }

    /// Parses the short stat keys used in item effects ("str", "spd", "mag").
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "str" => Some(AttributeKind::Strength),
            "spd" => Some(AttributeKind::Speed),
            "mag" => Some(AttributeKind::Magic),
            _ => None,
        }
    }
}

/// Per-stat attribute multipliers. Only ever grow during play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AttributeMultipliers {
    values: [f64; NUM_STATS],
}

impl Default for AttributeMultipliers {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl AttributeMultipliers {
    pub fn new(strength: f64, speed: f64, magic: f64) -> Self {
        Self {
            values: [strength, speed, magic],
        }
    }

    pub fn get(&self, kind: AttributeKind) -> f64 {
        self.values[kind.index()]
    }

    pub(crate) fn set(&mut self, kind: AttributeKind, value: f64) {
        self.values[kind.index()] = value;
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Share of each attribute in the total, in stat order.
    pub fn ratios(&self) -> [f64; NUM_STATS] {
        let total = self.total();
        if total <= 0.0 {
            return [1.0 / NUM_STATS as f64; NUM_STATS];
        }
        self.values.map(|v| v / total)
    }

    /// How closely two attribute profiles match, from 0.0 (opposite) to 1.0
    /// (identical): `1 - sum(|ratio_a - ratio_b|) / 2`.
    pub fn similarity(&self, other: &AttributeMultipliers) -> f64 {
        let a = self.ratios();
        let b = other.ratios();
        let total_diff: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum();
        1.0 - total_diff / 2.0
    }
}

/// Additive and multiplicative stat modifiers granted by equipment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatModifiers {
    pub additive: [f64; NUM_STATS],
    pub multiplicative: [f64; NUM_STATS],
}

impl Default for StatModifiers {
    fn default() -> Self {
        Self {
            additive: [0.0; NUM_STATS],
            multiplicative: [1.0; NUM_STATS],
        }
    }
}

impl StatModifiers {
    pub fn add(&self, kind: AttributeKind) -> f64 {
        self.additive[kind.index()]
    }

    pub fn mult(&self, kind: AttributeKind) -> f64 {
        self.multiplicative[kind.index()]
    }
}

/// Class label derived from how a member's power is weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberClass {
    Warrior,
    Scout,
    Mage,
    Ranger,
    Paladin,
    Sage,
    BattleMage,
    Generalist,
}

impl MemberClass {
    pub fn name(&self) -> &'static str {
        match self {
            MemberClass::Warrior => "Warrior",
            MemberClass::Scout => "Scout",
            MemberClass::Mage => "Mage",
            MemberClass::Ranger => "Ranger",
            MemberClass::Paladin => "Paladin",
            MemberClass::Sage => "Sage",
            MemberClass::BattleMage => "Battle-Mage",
            MemberClass::Generalist => "Generalist",
        }
    }

    /// Classifies a member from its attribute multipliers and power shares.
    pub fn classify(attributes: &AttributeMultipliers, speed_share: f64, magic_share: f64) -> Self {
        let str_weight =
            attributes.get(AttributeKind::Strength) * (1.0 - speed_share - magic_share);
        let spd_weight = attributes.get(AttributeKind::Speed) * speed_share;
        let mag_weight = attributes.get(AttributeKind::Magic) * magic_share;

        let max_weight = str_weight.max(spd_weight).max(mag_weight);
        if max_weight <= 0.0 {
            return MemberClass::Generalist;
        }

        let str_low = str_weight / max_weight < CLASS_SECONDARY_THRESHOLD;
        let spd_low = spd_weight / max_weight < CLASS_SECONDARY_THRESHOLD;
        let mag_low = mag_weight / max_weight < CLASS_SECONDARY_THRESHOLD;

        match (str_low, spd_low, mag_low) {
            (_, true, true) => MemberClass::Warrior,
            (true, _, true) => MemberClass::Scout,
            (true, true, _) => MemberClass::Mage,
            (_, _, true) => MemberClass::Ranger,
            (_, true, _) => MemberClass::Paladin,
            (true, _, _) => MemberClass::Sage,
            _ if str_weight > CLASS_BATTLE_MAGE_MIN_STRENGTH_WEIGHT => MemberClass::BattleMage,
            _ => MemberClass::Generalist,
        }
    }
}
