//! The per-second game tick.
//!
//! `game_tick()` asks the resource engine for every party's yield, applies
//! each outcome to the game state and reports what happened as a list of
//! [`TickEvent`]s, so the presentation layer never has to diff state.

use super::constants::STAMINA_REGEN_PER_TICK;
use super::error::GameError;
use super::game_state::GameState;
use super::resources::{calculate_resource_generation, TickOutcome};
use crate::items::{add_item, InventoryItem};
use crate::world::ContentLookup;
use rand::Rng;
use tracing::debug;

/// A single event produced by a game tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// A party earned gold.
    GoldGained { party_id: u32, amount: u64 },

    /// A member received its share of the party's experience.
    ExperienceGained {
        party_id: u32,
        member_id: String,
        amount: u64,
    },

    /// A member crossed one or more level thresholds this tick.
    LeveledUp {
        party_id: u32,
        member_id: String,
        new_level: u64,
    },

    /// An item from the area's drop table landed in the party inventory.
    ItemDropped {
        party_id: u32,
        item_id: u32,
        instance_id: String,
    },
}

/// One party's raw outcome for the tick. `None` when it produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyTick {
    pub party_id: u32,
    pub outcome: Option<TickOutcome>,
}

/// Result of processing a single game tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events in the order they were applied.
    pub events: Vec<TickEvent>,
    /// Per-party outcomes, in roster order.
    pub parties: Vec<PartyTick>,
}

impl TickResult {
    pub fn gold_gained(&self) -> u64 {
        self.parties
            .iter()
            .filter_map(|p| p.outcome.as_ref())
            .map(|o| o.gold)
            .sum()
    }

    pub fn experience_gained(&self) -> u64 {
        self.parties
            .iter()
            .filter_map(|p| p.outcome.as_ref())
            .map(|o| o.experience)
            .sum()
    }

    pub fn level_ups(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::LeveledUp { .. }))
            .count()
    }

    pub fn items_dropped(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::ItemDropped { .. }))
            .count()
    }
}

/// Applies one party's outcome: gold to the treasury, experience through
/// `grant_experience`, drops into the party inventory and +1 stamina for
/// every active member below max. Drops with no item definition are skipped.
pub fn apply_tick_outcome(
    state: &mut GameState,
    content: &impl ContentLookup,
    party_id: u32,
    outcome: &TickOutcome,
    events: &mut Vec<TickEvent>,
) -> Result<(), GameError> {
    state.party(party_id)?;

    if outcome.gold > 0 {
        state.earn_gold(outcome.gold);
        events.push(TickEvent::GoldGained {
            party_id,
            amount: outcome.gold,
        });
    }

    for allocation in &outcome.allocations {
        let before = state.member(party_id, &allocation.member_id)?.level();
        if !state.grant_experience(party_id, &allocation.member_id, allocation.amount)? {
            continue;
        }
        events.push(TickEvent::ExperienceGained {
            party_id,
            member_id: allocation.member_id.clone(),
            amount: allocation.amount,
        });

        let after = state.member(party_id, &allocation.member_id)?.level();
        if after > before {
            events.push(TickEvent::LeveledUp {
                party_id,
                member_id: allocation.member_id.clone(),
                new_level: after,
            });
        }
    }

    for &item_id in &outcome.drops {
        if content.item_definition(item_id).is_none() {
            debug!(party_id, item_id, "drop skipped, unknown item");
            continue;
        }
        let instance_id = add_item(state, party_id, InventoryItem::new(item_id))?;
        events.push(TickEvent::ItemDropped {
            party_id,
            item_id,
            instance_id,
        });
    }

    state
        .party_mut(party_id)?
        .regenerate_stamina(STAMINA_REGEN_PER_TICK);
    Ok(())
}

/// Processes one simulated second for every party.
///
/// Parties in transit or at an area the content tables do not know produce
/// nothing and are left untouched. The game counter always advances.
pub fn game_tick<R: Rng>(
    state: &mut GameState,
    content: &impl ContentLookup,
    rng: &mut R,
) -> TickResult {
    let mut result = TickResult::default();

    for index in 0..state.parties.len() {
        let party = &state.parties[index];
        let party_id = party.id;
        let outcome = calculate_resource_generation(party, content, rng);

        if let Some(outcome) = &outcome {
            debug!(
                party_id,
                gold = outcome.gold,
                exp = outcome.experience,
                drops = outcome.drops.len(),
                "tick yield"
            );
            // The party and its members were just read, so lookups cannot miss
            if let Err(e) = apply_tick_outcome(state, content, party_id, outcome, &mut result.events) {
                debug!(party_id, error = %e, "tick outcome not applied");
            }
        }

        result.parties.push(PartyTick { party_id, outcome });
    }

    state.counter += 1;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::member::test_support::member_at_level;
    use crate::items::get_all_items;
    use crate::world::{ContentNode, DropEntry, NodeKind, StaticContent};
    use rand::rngs::mock::StepRng;

    /// A field on top of the built-in item definitions.
    fn field(drops: Vec<DropEntry>) -> StaticContent {
        let mut content = StaticContent::new();
        for item in get_all_items() {
            content.insert_item(item);
        }
        content.with_node(ContentNode {
            id: 16,
            name: "Test Field".to_string(),
            kind: NodeKind::Field,
            difficulty: 5,
            give_gold: 3,
            give_exp: 2,
            drops,
            speed_effect: 1.0,
        })
    }

    /// Party 0 holds only pure-strength members at the given levels.
    fn state_with(levels: &[u64]) -> GameState {
        let mut state = GameState::new(0);
        for (i, &level) in levels.iter().enumerate() {
            state
                .add_member(0, member_at_level(&format!("m{}", i), level))
                .unwrap();
        }
        let starter = state.parties[0].members()[0].id.clone();
        state.parties[0].toggle_active(&starter).unwrap();
        state
    }

    #[test]
    fn test_tick_applies_gold_and_experience() {
        // Strengths 51 + 9 vs difficulty 5: multiplier 5.0, two strong members
        let mut state = state_with(&[10, 4]);
        let content = field(vec![]);

        let result = game_tick(&mut state, &content, &mut StepRng::new(0, 0));

        assert_eq!(state.gold, 30);
        assert_eq!(result.gold_gained(), 30);
        assert_eq!(result.experience_gained(), 10);
        assert_eq!(state.member(0, "m0").unwrap().experience(), 105);
        assert_eq!(state.member(0, "m1").unwrap().experience(), 21);
        assert_eq!(state.counter, 1);
        assert!(state.all_members().all(|m| m.stats_are_current()));
    }

    #[test]
    fn test_tick_reports_level_ups() {
        let mut state = state_with(&[10, 4]);
        let content = field(vec![]);
        // m1 at exp 16 needs 25 for level 5; +5 per tick
        let mut rng = StepRng::new(0, 0);
        game_tick(&mut state, &content, &mut rng);
        let result = game_tick(&mut state, &content, &mut rng);

        assert!(result.events.contains(&TickEvent::LeveledUp {
            party_id: 0,
            member_id: "m1".to_string(),
            new_level: 5
        }));
        assert!(state.history.highest_level >= 10);
    }

    #[test]
    fn test_tick_drops_items_into_party_inventory() {
        let mut state = state_with(&[10]);
        let content = field(vec![DropEntry {
            item_id: 3,
            probability: 0.5,
        }]);

        let result = game_tick(&mut state, &content, &mut StepRng::new(0, 0));

        assert_eq!(result.items_dropped(), 1);
        assert_eq!(state.parties[0].items.len(), 1);
        assert_eq!(state.parties[0].items[0].item_id, 3);
        assert!(state.found_items.contains(&3));
    }

    #[test]
    fn test_tick_skips_drops_with_no_item_definition() {
        let mut state = state_with(&[10]);
        let content = field(vec![DropEntry {
            item_id: 9999,
            probability: 1.0,
        }]);

        let result = game_tick(&mut state, &content, &mut StepRng::new(0, 0));

        assert_eq!(result.parties[0].outcome.as_ref().unwrap().drops, vec![9999]);
        assert_eq!(result.items_dropped(), 0);
        assert!(state.parties[0].items.is_empty());
        assert!(state.found_items.is_empty());
        // The rest of the outcome still applies
        assert!(state.gold > 0);
    }

    #[test]
    fn test_tick_regenerates_stamina_of_active_members() {
        let mut state = state_with(&[10, 4]);
        state.set_stamina(0, "m0", 60).unwrap();
        state.set_stamina(0, "m1", 60).unwrap();
        state.toggle_active(0, "m1").unwrap();

        game_tick(&mut state, &field(vec![]), &mut StepRng::new(0, 0));

        assert_eq!(state.member(0, "m0").unwrap().stamina(), 61);
        assert_eq!(state.member(0, "m1").unwrap().stamina(), 60);
    }

    #[test]
    fn test_tick_in_transit_produces_nothing() {
        let mut state = state_with(&[10]);
        state.move_party(0, 18).unwrap();
        state.set_stamina(0, "m0", 60).unwrap();
        let before = state.member(0, "m0").unwrap().clone();

        let result = game_tick(&mut state, &field(vec![]), &mut StepRng::new(0, 0));

        assert_eq!(result.parties, vec![PartyTick { party_id: 0, outcome: None }]);
        assert!(result.events.is_empty());
        assert_eq!(state.gold, 0);
        assert_eq!(state.member(0, "m0").unwrap(), &before);
        assert_eq!(state.counter, 1);
    }

    #[test]
    fn test_tick_at_unknown_area_produces_nothing() {
        let mut state = state_with(&[10]);
        let result = game_tick(&mut state, &StaticContent::new(), &mut StepRng::new(0, 0));
        assert_eq!(result.parties[0].outcome, None);
        assert_eq!(state.gold, 0);
    }
}
