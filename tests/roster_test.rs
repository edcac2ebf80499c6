//! Integration test: roster management
//!
//! Summoning, fusion, removal, dismissal and party limits through GameState.

use megami::character::{Archetype, AttributeMultipliers, Member, MemberError, PowerDistribution};
use megami::core::constants::MAX_PARTIES;
use megami::core::{GameError, GameState};
use megami::items::{add_item, equip_item, unequip_item, InventoryItem};
use megami::world::StaticContent;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const WOODEN_SWORD: u32 = 2;

fn member_at_level(id: &str, level: u64) -> Member {
    let archetype = Archetype {
        key: "tester",
        name: "Tester",
        rarity: 0,
        level_index: 0.5,
        attributes: AttributeMultipliers::new(1.0, 1.0, 1.0),
        distribution: PowerDistribution::new(0.0, 0.0),
    };
    let mut member = Member::new(id.to_string(), &archetype);
    member.grant_experience(level * level - 1);
    member
}

fn state_with_veterans() -> GameState {
    let mut state = GameState::new(0);
    state.add_member(0, member_at_level("m1", 10)).unwrap();
    state.add_member(0, member_at_level("m2", 4)).unwrap();
    state
}

#[test]
fn test_summon_spends_gold_and_records_history() {
    let mut state = GameState::new(0);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let err = state.summon_member(0, 0, &mut rng).unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientGold {
            needed: 20,
            available: 0
        }
    );

    state.earn_gold(25);
    let archetype = state.summon_member(0, 0, &mut rng).unwrap().archetype.clone();

    assert_eq!(state.gold, 5);
    assert_eq!(state.parties[0].len(), 2);
    assert_eq!(state.history.total_summons, 1);
    assert_eq!(state.history.summons_by_rank, [1, 0, 0, 0]);
    assert!(state.found_archetypes.contains(&archetype));
}

#[test]
fn test_unknown_summon_rank() {
    let mut state = GameState::new(0);
    state.earn_gold(1_000_000_000);
    let err = state
        .summon_member(0, 9, &mut ChaCha8Rng::seed_from_u64(1))
        .unwrap_err();
    assert_eq!(err, GameError::UnknownSummonRank(9));
}

#[test]
fn test_fusion_merges_experience_and_records_history() {
    let mut state = state_with_veterans();

    let level = state.fuse_members(0, "m1", "m2").unwrap().level();

    // 100 + 16 experience on a square-root curve
    assert_eq!(level, 10);
    assert_eq!(state.member(0, "m1").unwrap().experience(), 116);
    assert!(!state.parties[0].contains("m2"));
    assert_eq!(state.history.total_fusions, 1);
}

#[test]
fn test_fusion_refusals_leave_state_untouched() {
    let mut state = state_with_veterans();
    let before = state.clone();

    assert_eq!(
        state.fuse_members(0, "m1", "m1").unwrap_err(),
        GameError::SelfFusion
    );
    assert!(state.fuse_members(0, "m1", "ghost").unwrap_err().is_not_found());
    assert_eq!(state, before);

    state.fuse_members(0, "m1", "m2").unwrap();
    let starter = state.parties[0].members()[0].id.clone();
    assert!(matches!(
        state.fuse_members(0, "m1", &starter).unwrap_err(),
        GameError::PartyTooSmallToFuse { .. }
    ));
    assert_eq!(state.parties[0].len(), 2);
}

#[test]
fn test_equipped_member_cannot_be_removed_or_fused() {
    let mut state = state_with_veterans();
    let content = StaticContent::builtin();
    let sword = add_item(&mut state, 0, InventoryItem::new(WOODEN_SWORD)).unwrap();
    equip_item(&mut state, &content, 0, &sword, "m2").unwrap();

    assert_eq!(
        state.remove_member(0, "m2").unwrap_err(),
        GameError::Equipped("m2".to_string())
    );
    assert!(state.fuse_members(0, "m1", "m2").is_err());

    unequip_item(&mut state, &content, 0, &sword).unwrap();
    assert!(state.remove_member(0, "m2").is_ok());
}

#[test]
fn test_last_member_cannot_be_removed() {
    let mut state = GameState::new(0);
    let starter = state.parties[0].members()[0].id.clone();
    assert_eq!(
        state.remove_member(0, &starter).unwrap_err(),
        GameError::LastMember
    );
    assert_eq!(state.parties[0].len(), 1);
}

#[test]
fn test_dismiss_pays_gold_value() {
    let mut state = state_with_veterans();
    // floor(100^0.7) = 25, weighted attributes 1.0 + 0.8 + 1.2
    assert_eq!(state.dismiss_member(0, "m1").unwrap(), 75);
    assert_eq!(state.gold, 75);
    assert!(!state.parties[0].contains("m1"));
}

#[test]
fn test_transfer_member_between_parties() {
    let mut state = state_with_veterans();
    let second = state.create_party(member_at_level("scout", 2)).unwrap();

    state.transfer_member(0, "m2", second).unwrap();
    assert_eq!(state.parties[1].len(), 2);
    assert!(state.member(second, "m2").is_ok());

    assert!(state.transfer_member(0, "m1", 42).unwrap_err().is_not_found());
    assert!(state.parties[0].contains("m1"));
}

#[test]
fn test_party_limit() {
    let mut state = GameState::new(0);
    for i in 1..MAX_PARTIES {
        state
            .create_party(member_at_level(&format!("founder{}", i), 2))
            .unwrap();
    }
    assert_eq!(
        state
            .create_party(member_at_level("one-too-many", 2))
            .unwrap_err(),
        GameError::PartyLimitReached(MAX_PARTIES)
    );
}

#[test]
fn test_distribution_changes_stats_or_is_refused() {
    let mut state = state_with_veterans();

    state.set_distribution(0, "m1", 0.5, 0.5).unwrap();
    let m1 = state.member(0, "m1").unwrap();
    assert_eq!((m1.strength(), m1.speed(), m1.magic()), (0, 25, 25));

    let before = state.clone();
    let err = state.set_distribution(0, "m1", 0.7, 0.5).unwrap_err();
    assert!(matches!(
        err,
        GameError::Member(MemberError::InvalidDistribution { .. })
    ));
    assert_eq!(state, before);
}
