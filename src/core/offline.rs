//! Offline progression.
//!
//! Time away is paid out as a single treasure chest rather than by replaying
//! ticks. The chest is worth twice the gold the parties would have earned in
//! the (capped) time away, and only turns into gold when it is opened through
//! the normal item path.

use super::constants::*;
use super::game_state::GameState;
use super::resources::gold_generation;
use crate::items::{add_item, InventoryItem};
use crate::party::Party;
use crate::world::ContentLookup;
use tracing::{info, warn};

/// Result of reconciling one absence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OfflineProgress {
    /// Gold value of the treasure chest
    pub treasure_value: u64,
    /// Seconds added to the game counter
    pub time_to_add: u64,
}

/// Report of offline progression results
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OfflineReport {
    pub elapsed_seconds: i64,
    pub minutes_away: i64,
    /// Minutes actually rewarded after the cap
    pub rewarded_minutes: i64,
    pub treasure_value: u64,
    pub time_to_add: u64,
    /// Instance id of the chest, when one was created
    pub treasure_instance: Option<String>,
}

/// Treasure and counter advance for `minutes_away` minutes of absence.
///
/// Absences of 5 minutes or less earn nothing. Longer ones are capped at an
/// hour. Parties in transit or at an unknown area contribute nothing.
pub fn calculate_offline_progression(
    minutes_away: i64,
    parties: &[Party],
    content: &impl ContentLookup,
) -> OfflineProgress {
    if minutes_away <= OFFLINE_MIN_MINUTES {
        return OfflineProgress::default();
    }
    let minutes = minutes_away.min(OFFLINE_CAP_MINUTES);

    let hourly_gold: f64 = parties
        .iter()
        .filter(|p| !p.is_moving())
        .filter_map(|p| {
            content
                .content_node(p.location.area_id)
                .map(|node| gold_generation(node, p.members()))
        })
        .map(|per_second| per_second as f64 * SECONDS_PER_HOUR as f64)
        .sum();

    let treasure_value =
        (hourly_gold * (minutes as f64 / 60.0) * OFFLINE_TREASURE_MULTIPLIER).floor() as u64;

    OfflineProgress {
        treasure_value,
        time_to_add: (60 * minutes) as u64,
    }
}

/// Reconciles the time since the last save: advances the counter, puts a
/// treasure chest in the first party's inventory and stamps the save time.
///
/// Call once per load, before any live tick.
pub fn process_offline_progression(
    state: &mut GameState,
    content: &impl ContentLookup,
    current_time: i64,
) -> OfflineReport {
    let elapsed_seconds = current_time - state.last_save_time;
    state.last_save_time = current_time;
    if elapsed_seconds <= 0 {
        return OfflineReport::default();
    }

    let minutes_away = elapsed_seconds / 60;
    let progress = calculate_offline_progression(minutes_away, &state.parties, content);
    state.counter += progress.time_to_add;

    let mut treasure_instance = None;
    if progress.treasure_value > 0 {
        let first_party = state.parties.first().map(|p| p.id);
        match first_party {
            Some(party_id) => {
                match add_item(state, party_id, InventoryItem::treasure(progress.treasure_value)) {
                    Ok(instance_id) => treasure_instance = Some(instance_id),
                    Err(e) => warn!(party_id, error = %e, "offline treasure not added"),
                }
            }
            None => warn!("no party to receive offline treasure"),
        }
    }

    info!(
        minutes_away,
        treasure = progress.treasure_value,
        seconds_added = progress.time_to_add,
        "offline progression applied"
    );

    OfflineReport {
        elapsed_seconds,
        minutes_away,
        rewarded_minutes: progress.time_to_add as i64 / 60,
        treasure_value: progress.treasure_value,
        time_to_add: progress.time_to_add,
        treasure_instance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::member::test_support::member_at_level;
    use crate::world::{ContentNode, NodeKind, StaticContent};

    /// A node where a weak single-member party makes exactly 6 gold/second:
    /// floor(12 × 0.5 × 1).
    fn six_gold_content() -> StaticContent {
        StaticContent::new().with_node(ContentNode {
            id: 100,
            name: "Gold Mine".to_string(),
            kind: NodeKind::Field,
            difficulty: 1_000_000,
            give_gold: 12,
            give_exp: 1,
            drops: vec![],
            speed_effect: 1.0,
        })
    }

    fn six_gold_parties() -> Vec<Party> {
        vec![Party::new(0, "Party 1".to_string(), member_at_level("m", 4), 100)]
    }

    #[test]
    fn test_short_absence_earns_nothing() {
        let progress = calculate_offline_progression(3, &six_gold_parties(), &six_gold_content());
        assert_eq!(progress, OfflineProgress::default());

        let progress = calculate_offline_progression(5, &six_gold_parties(), &six_gold_content());
        assert_eq!(progress.treasure_value, 0);
        assert_eq!(progress.time_to_add, 0);
    }

    #[test]
    fn test_thirty_minutes() {
        let progress = calculate_offline_progression(30, &six_gold_parties(), &six_gold_content());
        assert_eq!(
            progress,
            OfflineProgress {
                treasure_value: 21_600,
                time_to_add: 1_800
            }
        );
    }

    #[test]
    fn test_absence_is_capped_at_one_hour() {
        let hour = calculate_offline_progression(60, &six_gold_parties(), &six_gold_content());
        let two_hours = calculate_offline_progression(120, &six_gold_parties(), &six_gold_content());
        assert_eq!(hour, two_hours);
        assert_eq!(hour.treasure_value, 43_200);
        assert_eq!(hour.time_to_add, 3_600);
    }

    #[test]
    fn test_transit_and_unknown_parties_contribute_nothing() {
        let mut moving = six_gold_parties();
        moving[0].move_to(16);
        let progress = calculate_offline_progression(30, &moving, &six_gold_content());
        assert_eq!(progress.treasure_value, 0);
        // Time still passes
        assert_eq!(progress.time_to_add, 1_800);

        let lost = vec![Party::new(0, "Lost".to_string(), member_at_level("m", 4), 999)];
        let progress = calculate_offline_progression(30, &lost, &six_gold_content());
        assert_eq!(progress.treasure_value, 0);
    }

    #[test]
    fn test_process_creates_treasure_and_advances_counter() {
        let mut state = GameState::new(1_000);
        state.parties = six_gold_parties();
        let content = six_gold_content();

        let report = process_offline_progression(&mut state, &content, 1_000 + 30 * 60 + 59);

        assert_eq!(report.minutes_away, 30);
        assert_eq!(report.rewarded_minutes, 30);
        assert_eq!(report.treasure_value, 21_600);
        assert_eq!(state.counter, 1_800);
        assert_eq!(state.last_save_time, 1_000 + 30 * 60 + 59);
        assert_eq!(state.gold, 0);

        let chest = &state.parties[0].items[0];
        assert_eq!(chest.item_id, TREASURE_ITEM_ID);
        assert_eq!(chest.price_override, Some(21_600));
        assert_eq!(report.treasure_instance.as_deref(), Some(chest.instance_id.as_str()));
    }

    #[test]
    fn test_process_short_absence_adds_nothing() {
        let mut state = GameState::new(1_000);
        state.parties = six_gold_parties();
        let report = process_offline_progression(&mut state, &six_gold_content(), 1_000 + 120);

        assert_eq!(report.treasure_value, 0);
        assert_eq!(report.rewarded_minutes, 0);
        assert_eq!(state.counter, 0);
        assert!(state.parties[0].items.is_empty());
    }

    #[test]
    fn test_process_clock_went_backwards() {
        let mut state = GameState::new(5_000);
        let report = process_offline_progression(&mut state, &StaticContent::builtin(), 4_000);
        assert_eq!(report, OfflineReport::default());
        assert_eq!(state.last_save_time, 4_000);
    }
}
