//! Per-tick resource yields for a party at its current location.
//!
//! Everything here is pure: the functions read a party and a content node and
//! return numbers. Applying a [`TickOutcome`] to the game state is done by
//! `core::tick`.

use crate::character::member::Member;
use crate::core::constants::{STRENGTH_MULTIPLIER_MAX, STRENGTH_MULTIPLIER_MIN};
use crate::party::{count_active, count_strong, party_strength, Party};
use crate::world::{ContentLookup, ContentNode};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Experience handed to one member this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceAllocation {
    pub member_id: String,
    pub amount: u64,
}

/// What one party produced in one tick. Transient, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub gold: u64,
    pub experience: u64,
    pub allocations: Vec<ExperienceAllocation>,
    /// Dropped item ids in drop-table order
    pub drops: Vec<u32>,
}

/// `clamp(strength / difficulty, 0.5, 5.0)`, with difficulty 0 read as 1.
pub fn strength_multiplier(party_strength: f64, difficulty: u64) -> f64 {
    let divisor = difficulty.max(1) as f64;
    (party_strength / divisor).clamp(STRENGTH_MULTIPLIER_MIN, STRENGTH_MULTIPLIER_MAX)
}

/// `floor(give_gold × multiplier × max(strong members, 1))`. An empty roster
/// earns nothing.
pub fn gold_generation(node: &ContentNode, members: &[Member]) -> u64 {
    if members.is_empty() {
        return 0;
    }
    let multiplier = strength_multiplier(party_strength(members), node.difficulty);
    let strong = count_strong(members, node.difficulty).max(1);
    (node.give_gold as f64 * multiplier * strong as f64).floor() as u64
}

/// `floor(give_exp × multiplier)`. An empty roster earns nothing.
pub fn exp_generation(node: &ContentNode, members: &[Member]) -> u64 {
    if members.is_empty() {
        return 0;
    }
    let multiplier = strength_multiplier(party_strength(members), node.difficulty);
    (node.give_exp as f64 * multiplier).floor() as u64
}

/// Splits `total` across active members in roster order. The first
/// `total mod n` members get one extra point, so the sum is always `total`.
pub fn distribute_experience(members: &[Member], total: u64) -> Vec<ExperienceAllocation> {
    let active = count_active(members) as u64;
    if active == 0 {
        return Vec::new();
    }
    let base = total / active;
    let remainder = total % active;

    members
        .iter()
        .filter(|m| m.active)
        .enumerate()
        .map(|(i, m)| ExperienceAllocation {
            member_id: m.id.clone(),
            amount: if (i as u64) < remainder { base + 1 } else { base },
        })
        .collect()
}

/// Rolls every drop-table entry independently. An entry drops when its draw
/// in [0, 1) is strictly below its probability.
pub fn item_drops(node: &ContentNode, rng: &mut impl Rng) -> Vec<u32> {
    node.drops
        .iter()
        .filter(|entry| rng.gen::<f64>() < entry.probability)
        .map(|entry| entry.item_id)
        .collect()
}

/// Yields for one party for one tick, or `None` when the party is in transit
/// or standing somewhere the content tables do not know.
pub fn calculate_resource_generation(
    party: &Party,
    content: &impl ContentLookup,
    rng: &mut impl Rng,
) -> Option<TickOutcome> {
    if party.is_moving() {
        return None;
    }
    let node = content.content_node(party.location.area_id)?;
    let members = party.members();

    let gold = gold_generation(node, members);
    let experience = exp_generation(node, members);
    Some(TickOutcome {
        gold,
        experience,
        allocations: distribute_experience(members, experience),
        drops: item_drops(node, rng),
    })
}
