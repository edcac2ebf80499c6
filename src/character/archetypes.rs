//! Archetype definitions and summon pools.

use super::attributes::AttributeMultipliers;
use super::derived_stats::PowerDistribution;
use crate::core::constants::STARTER_ARCHETYPE;
use rand::Rng;

/// Fixed template a member is created from.
#[derive(Debug, Clone, PartialEq)]
pub struct Archetype {
    pub key: &'static str,
    pub name: &'static str,
    /// 0 = common, 1 = uncommon, 2 = rare, 3 = legendary
    pub rarity: u8,
    /// Growth curve steepness in (0, 1)
    pub level_index: f64,
    pub attributes: AttributeMultipliers,
    pub distribution: PowerDistribution,
}

/// Returns every archetype, legendary first.
pub fn get_all_archetypes() -> Vec<Archetype> {
    vec![
        // Legendary (rank 3)
        starter_archetype(),
        archetype("thor", "Thor", 3, 0.39, (1.3, 0.9, 0.8), (0.2, 0.1)),
        archetype("odin", "Odin", 3, 0.38, (0.9, 0.8, 1.3), (0.1, 0.5)),
        // Rare (rank 2)
        archetype("einherjar", "Einherjar", 2, 0.42, (1.2, 1.0, 0.8), (0.3, 0.1)),
        archetype("vidar", "Vidar", 2, 0.41, (1.0, 1.2, 0.8), (0.4, 0.1)),
        archetype("freyja", "Freyja", 2, 0.40, (0.8, 1.0, 1.2), (0.2, 0.4)),
        // Uncommon (rank 1)
        archetype("dis", "Dis", 1, 0.43, (1.1, 0.9, 1.0), (0.2, 0.3)),
        archetype("magni", "Magni", 1, 0.42, (1.2, 0.9, 0.9), (0.2, 0.2)),
        archetype("hermod", "Hermod", 1, 0.41, (0.9, 1.2, 0.9), (0.4, 0.2)),
        // Common (rank 0)
        archetype("embla", "Embla", 0, 0.44, (1.0, 1.0, 1.0), (0.3, 0.3)),
        archetype("askr", "Askr", 0, 0.43, (1.1, 1.0, 0.9), (0.3, 0.2)),
        archetype("mardoll", "Mardoll", 0, 0.42, (0.9, 1.0, 1.1), (0.2, 0.4)),
    ]
}

/// The archetype every new game's first member is created from.
pub fn starter_archetype() -> Archetype {
    archetype(STARTER_ARCHETYPE, "Megami", 3, 0.40, (1.0, 1.0, 1.0), (0.3, 0.3))
}

fn archetype(
    key: &'static str,
    name: &'static str,
    rarity: u8,
    level_index: f64,
    (strength, speed, magic): (f64, f64, f64),
    (speed_share, magic_share): (f64, f64),
) -> Archetype {
    Archetype {
        key,
        name,
        rarity,
        level_index,
        attributes: AttributeMultipliers::new(strength, speed, magic),
        distribution: PowerDistribution::new(speed_share, magic_share),
    }
}

/// Looks up an archetype by key.
pub fn get_archetype(key: &str) -> Option<Archetype> {
    get_all_archetypes().into_iter().find(|a| a.key == key)
}

/// Summon pool for a rank: `(archetype key, probability)`, probabilities sum to 1.
pub fn summon_pool(rank: u8) -> Option<&'static [(&'static str, f64)]> {
    const POOLS: [&[(&str, f64)]; 4] = [
        &[("embla", 0.4), ("askr", 0.4), ("mardoll", 0.2)],
        &[("dis", 0.4), ("magni", 0.3), ("hermod", 0.3)],
        &[("einherjar", 0.4), ("vidar", 0.3), ("freyja", 0.3)],
        &[("thor", 0.6), ("odin", 0.4)],
    ];
    POOLS.get(rank as usize).copied()
}

/// Rolls an archetype key from a rank's pool using cumulative probability.
pub fn roll_summon(rank: u8, rng: &mut impl Rng) -> Option<&'static str> {
    let pool = summon_pool(rank)?;
    let roll = rng.gen::<f64>();
    let mut cumulative = 0.0;
    for &(key, probability) in pool {
        cumulative += probability;
        if roll <= cumulative {
            return Some(key);
        }
    }
    // Rounding can leave the cumulative sum a hair under 1.0
    pool.last().map(|&(key, _)| key)
}
