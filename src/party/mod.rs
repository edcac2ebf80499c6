//! Parties and party-level aggregation.

pub mod aggregate;
pub mod types;

pub use aggregate::{
    combat_effectiveness, count_active, count_strong, party_strength, stamina_modifier,
    CombatEffectiveness,
};
pub use types::{Party, PartyLocation};
