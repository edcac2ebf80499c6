use crate::character::archetypes::{get_archetype, roll_summon, starter_archetype};
use crate::character::attributes::AttributeKind;
use crate::character::member::Member;
use crate::core::constants::{MAX_PARTIES, STARTING_AREA_ID, SUMMON_RANK_COSTS};
use crate::core::error::GameError;
use crate::party::Party;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Lifetime counters shown on the records screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    pub total_fusions: u64,
    /// Highest member level ever reached, fused-away members included
    pub highest_level: u64,
    pub total_summons: u64,
    pub summons_by_rank: [u64; 4],
}

/// Everything that is persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Game age in seconds: live ticks plus reconciled offline time
    pub counter: u64,
    pub gold: u64,
    /// Lifetime gold earned
    pub total_gold: u64,
    pub parties: Vec<Party>,
    pub history: GameHistory,
    pub found_archetypes: BTreeSet<String>,
    pub found_items: BTreeSet<u32>,
    /// Unix timestamp of the last save
    pub last_save_time: i64,
}

impl GameState {
    /// New game: one party at the starting area with a single starter member.
    pub fn new(current_time: i64) -> Self {
        let starter = Member::spawn(&starter_archetype());
        let mut found_archetypes = BTreeSet::new();
        found_archetypes.insert(starter.archetype.clone());

        Self {
            counter: 0,
            gold: 0,
            total_gold: 0,
            history: GameHistory {
                highest_level: starter.level(),
                ..GameHistory::default()
            },
            parties: vec![Party::new(0, "Party 1".to_string(), starter, STARTING_AREA_ID)],
            found_archetypes,
            found_items: BTreeSet::new(),
            last_save_time: current_time,
        }
    }

    /// Normalizes a freshly deserialized state. Every member goes through
    /// `update_stats` once; stored derived fields are discarded.
    pub fn rehydrate(&mut self) {
        for party in self.parties.iter_mut() {
            party.rehydrate();
            if party.is_empty() {
                warn!(party_id = party.id, "loaded party has no members");
            }
            self.history.highest_level = self.history.highest_level.max(party.highest_level());
        }
    }

    /// Stamps `current_time` as the save time. Every snapshot that is written
    /// out must go through here, or the next load pays live play again as
    /// offline time.
    pub fn mark_saved(&mut self, current_time: i64) {
        self.last_save_time = current_time;
    }

    // ── Lookup ──────────────────────────────────────────────────

    pub fn party(&self, party_id: u32) -> Result<&Party, GameError> {
        self.parties
            .iter()
            .find(|p| p.id == party_id)
            .ok_or(GameError::PartyNotFound(party_id))
    }

    pub fn party_mut(&mut self, party_id: u32) -> Result<&mut Party, GameError> {
        self.parties
            .iter_mut()
            .find(|p| p.id == party_id)
            .ok_or(GameError::PartyNotFound(party_id))
    }

    pub fn member(&self, party_id: u32, member_id: &str) -> Result<&Member, GameError> {
        self.party(party_id)?
            .member(member_id)
            .ok_or_else(|| GameError::MemberNotFound(member_id.to_string()))
    }

    fn member_mut(&mut self, party_id: u32, member_id: &str) -> Result<&mut Member, GameError> {
        self.party_mut(party_id)?
            .member_mut(member_id)
            .ok_or_else(|| GameError::MemberNotFound(member_id.to_string()))
    }

    /// Finds which party a member belongs to.
    pub fn find_member(&self, member_id: &str) -> Option<(u32, &Member)> {
        self.parties
            .iter()
            .find_map(|p| p.member(member_id).map(|m| (p.id, m)))
    }

    pub fn all_members(&self) -> impl Iterator<Item = &Member> {
        self.parties.iter().flat_map(|p| p.members().iter())
    }

    // ── Treasury ────────────────────────────────────────────────

    pub fn earn_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
        self.total_gold = self.total_gold.saturating_add(amount);
    }

    pub fn spend_gold(&mut self, amount: u64) -> Result<(), GameError> {
        if self.gold < amount {
            return Err(GameError::InsufficientGold {
                needed: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    // ── Parties ─────────────────────────────────────────────────

    /// Creates a new party at the starting area around `founder`.
    pub fn create_party(&mut self, founder: Member) -> Result<u32, GameError> {
        if self.parties.len() >= MAX_PARTIES {
            return Err(GameError::PartyLimitReached(MAX_PARTIES));
        }
        let id = self.parties.iter().map(|p| p.id + 1).max().unwrap_or(0);
        let name = format!("Party {}", self.parties.len() + 1);
        self.found_archetypes.insert(founder.archetype.clone());
        self.note_level(founder.level());
        self.parties
            .push(Party::new(id, name, founder, STARTING_AREA_ID));
        info!(party_id = id, "party created");
        Ok(id)
    }

    pub fn rename_party(&mut self, party_id: u32, name: String) -> Result<(), GameError> {
        self.party_mut(party_id)?.name = name;
        Ok(())
    }

    /// Sends a party toward another area. Unknown areas are accepted here;
    /// the party simply produces nothing once it lands there.
    pub fn move_party(&mut self, party_id: u32, area_id: u32) -> Result<(), GameError> {
        self.party_mut(party_id)?.move_to(area_id);
        Ok(())
    }

    pub fn arrive_party(&mut self, party_id: u32) -> Result<(), GameError> {
        self.party_mut(party_id)?.arrive();
        Ok(())
    }

    // ── Members ─────────────────────────────────────────────────

    pub fn add_member(&mut self, party_id: u32, member: Member) -> Result<(), GameError> {
        let archetype = member.archetype.clone();
        let level = member.level();
        self.party_mut(party_id)?.add_member(member);
        self.found_archetypes.insert(archetype);
        self.note_level(level);
        Ok(())
    }

    /// Spends the rank's summon cost and adds a rolled member to the party.
    pub fn summon_member(
        &mut self,
        party_id: u32,
        rank: u8,
        rng: &mut impl Rng,
    ) -> Result<&Member, GameError> {
        let cost = *SUMMON_RANK_COSTS
            .get(rank as usize)
            .ok_or(GameError::UnknownSummonRank(rank))?;
        self.party(party_id)?;
        if self.gold < cost {
            return Err(GameError::InsufficientGold {
                needed: cost,
                available: self.gold,
            });
        }

        let key = roll_summon(rank, rng).ok_or(GameError::UnknownSummonRank(rank))?;
        let archetype = get_archetype(key).ok_or_else(|| GameError::UnknownArchetype(key.to_string()))?;
        self.spend_gold(cost)?;

        let member = Member::spawn(&archetype);
        self.history.total_summons += 1;
        self.history.summons_by_rank[rank as usize] += 1;
        info!(party_id, rank, archetype = key, cost, "member summoned");

        self.add_member(party_id, member)?;
        let party = self.party(party_id)?;
        party
            .members()
            .last()
            .ok_or(GameError::PartyNotFound(party_id))
    }

    /// Removes a member. Refused for equipped members and the last member.
    pub fn remove_member(&mut self, party_id: u32, member_id: &str) -> Result<Member, GameError> {
        self.party_mut(party_id)?
            .remove_member(member_id)
            .inspect_err(|e| debug!(party_id, member_id, error = %e, "remove refused"))
    }

    /// Removes a member and pays out its gold value.
    pub fn dismiss_member(&mut self, party_id: u32, member_id: &str) -> Result<u64, GameError> {
        let member = self.remove_member(party_id, member_id)?;
        let value = member.gold_value();
        self.earn_gold(value);
        info!(party_id, member_id, gold = value, "member dismissed");
        Ok(value)
    }

    /// Moves a member into another party under the same refusals as removal.
    pub fn transfer_member(
        &mut self,
        from_party: u32,
        member_id: &str,
        to_party: u32,
    ) -> Result<(), GameError> {
        self.party(to_party)?;
        let member = self.remove_member(from_party, member_id)?;
        self.party_mut(to_party)?.add_member(member);
        Ok(())
    }

    pub fn fuse_members(
        &mut self,
        party_id: u32,
        base_id: &str,
        sacrifice_id: &str,
    ) -> Result<&Member, GameError> {
        let level = self
            .party_mut(party_id)?
            .fuse_members(base_id, sacrifice_id)
            .inspect_err(|e| debug!(party_id, base_id, sacrifice_id, error = %e, "fusion refused"))?
            .level();

        self.history.total_fusions += 1;
        self.note_level(level);
        info!(party_id, base_id, sacrifice_id, level, "members fused");
        self.member(party_id, base_id)
    }

    /// Grants experience to one member. Returns false for a zero grant.
    pub fn grant_experience(
        &mut self,
        party_id: u32,
        member_id: &str,
        amount: u64,
    ) -> Result<bool, GameError> {
        let member = self.member_mut(party_id, member_id)?;
        let granted = member.grant_experience(amount);
        let level = member.level();
        self.note_level(level);
        Ok(granted)
    }

    pub fn set_distribution(
        &mut self,
        party_id: u32,
        member_id: &str,
        speed: f64,
        magic: f64,
    ) -> Result<(), GameError> {
        self.member_mut(party_id, member_id)?
            .set_distribution(speed, magic)
            .inspect_err(|e| debug!(member_id, error = %e, "distribution refused"))?;
        Ok(())
    }

    pub fn increase_attribute(
        &mut self,
        party_id: u32,
        member_id: &str,
        kind: AttributeKind,
        amount: f64,
    ) -> Result<(), GameError> {
        self.member_mut(party_id, member_id)?
            .increase_attribute(kind, amount)?;
        Ok(())
    }

    pub fn toggle_active(&mut self, party_id: u32, member_id: &str) -> Result<bool, GameError> {
        self.party_mut(party_id)?.toggle_active(member_id)
    }

    pub fn rename_member(
        &mut self,
        party_id: u32,
        member_id: &str,
        name: String,
    ) -> Result<(), GameError> {
        self.party_mut(party_id)?.rename_member(member_id, name)
    }

    pub fn add_stamina(&mut self, party_id: u32, member_id: &str, amount: i32) -> Result<(), GameError> {
        self.member_mut(party_id, member_id)?.add_stamina(amount);
        Ok(())
    }

    pub fn set_stamina(&mut self, party_id: u32, member_id: &str, value: i32) -> Result<(), GameError> {
        self.member_mut(party_id, member_id)?.set_stamina(value);
        Ok(())
    }

    pub(crate) fn note_level(&mut self, level: u64) {
        self.history.highest_level = self.history.highest_level.max(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::member::test_support::member_at_level;
    use crate::core::constants::STARTER_ARCHETYPE;
    use rand::rngs::mock::StepRng;

    fn state_with_members(levels: &[u64]) -> GameState {
        let mut state = GameState::new(0);
        for (i, &level) in levels.iter().enumerate() {
            state
                .add_member(0, member_at_level(&format!("m{}", i), level))
                .unwrap();
        }
        state
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(1_700_000_000);
        assert_eq!(state.parties.len(), 1);
        assert_eq!(state.parties[0].len(), 1);
        assert_eq!(state.parties[0].location.area_id, STARTING_AREA_ID);
        assert_eq!(state.parties[0].members()[0].archetype, STARTER_ARCHETYPE);
        assert!(state.found_archetypes.contains(STARTER_ARCHETYPE));
        assert_eq!(state.last_save_time, 1_700_000_000);
        assert_eq!(state.gold, 0);
    }

    #[test]
    fn test_spend_gold_refuses_overdraft() {
        let mut state = GameState::new(0);
        state.earn_gold(5);
        assert_eq!(
            state.spend_gold(20),
            Err(GameError::InsufficientGold {
                needed: 20,
                available: 5
            })
        );
        assert_eq!(state.gold, 5);
        state.spend_gold(5).unwrap();
        assert_eq!(state.gold, 0);
        assert_eq!(state.total_gold, 5);
    }

    #[test]
    fn test_create_party_limit() {
        let mut state = GameState::new(0);
        assert_eq!(state.create_party(member_at_level("a", 1)), Ok(1));
        assert_eq!(state.create_party(member_at_level("b", 1)), Ok(2));
        assert_eq!(
            state.create_party(member_at_level("c", 1)),
            Err(GameError::PartyLimitReached(3))
        );
        assert_eq!(state.parties.len(), 3);
        assert_eq!(state.parties[2].name, "Party 3");
    }

    #[test]
    fn test_summon_spends_gold_and_records_history() {
        let mut state = GameState::new(0);
        state.earn_gold(25);

        let archetype = state
            .summon_member(0, 0, &mut StepRng::new(0, 0))
            .unwrap()
            .archetype
            .clone();

        assert_eq!(archetype, "embla");
        assert_eq!(state.gold, 5);
        assert_eq!(state.parties[0].len(), 2);
        assert_eq!(state.history.total_summons, 1);
        assert_eq!(state.history.summons_by_rank, [1, 0, 0, 0]);
        assert!(state.found_archetypes.contains("embla"));
    }

    #[test]
    fn test_summon_without_gold_is_refused() {
        let mut state = GameState::new(0);
        let err = state
            .summon_member(0, 1, &mut StepRng::new(0, 0))
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientGold {
                needed: 1000,
                available: 0
            }
        );
        assert_eq!(state.parties[0].len(), 1);
        assert_eq!(state.history.total_summons, 0);
    }

    #[test]
    fn test_summon_unknown_rank_or_party() {
        let mut state = GameState::new(0);
        state.earn_gold(1_000_000_000);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            state.summon_member(0, 4, &mut rng).unwrap_err(),
            GameError::UnknownSummonRank(4)
        );
        assert_eq!(
            state.summon_member(9, 0, &mut rng).unwrap_err(),
            GameError::PartyNotFound(9)
        );
        assert_eq!(state.gold, 1_000_000_000);
    }

    #[test]
    fn test_dismiss_member_pays_gold_value() {
        let mut state = state_with_members(&[10]);
        assert_eq!(state.dismiss_member(0, "m0"), Ok(75));
        assert_eq!(state.gold, 75);
        assert_eq!(state.parties[0].len(), 1);
    }

    #[test]
    fn test_fuse_records_history() {
        let mut state = state_with_members(&[10, 5]);
        let experience = state.fuse_members(0, "m0", "m1").unwrap().experience();
        assert_eq!(experience, 125);
        assert_eq!(state.history.total_fusions, 1);
        assert_eq!(state.history.highest_level, 11);
    }

    #[test]
    fn test_fuse_refusal_leaves_state_untouched() {
        let mut state = state_with_members(&[10]);
        let before = state.clone();
        let starter = state.parties[0].members()[0].id.clone();
        assert!(state.fuse_members(0, &starter, "m0").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_member_mutations_report_not_found() {
        let mut state = GameState::new(0);
        assert!(state.grant_experience(0, "ghost", 10).unwrap_err().is_not_found());
        assert!(state.grant_experience(7, "ghost", 10).unwrap_err().is_not_found());
        assert!(state
            .set_distribution(0, "ghost", 0.1, 0.1)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_invalid_distribution_is_a_refusal() {
        let mut state = state_with_members(&[10]);
        let err = state.set_distribution(0, "m0", 0.9, 0.9).unwrap_err();
        assert!(!err.is_not_found());
        assert!(state.member(0, "m0").unwrap().stats_are_current());
    }

    #[test]
    fn test_grant_experience_tracks_highest_level() {
        let mut state = state_with_members(&[1]);
        assert_eq!(state.grant_experience(0, "m0", 99), Ok(true));
        assert_eq!(state.grant_experience(0, "m0", 0), Ok(false));
        assert_eq!(state.history.highest_level, 10);
    }

    #[test]
    fn test_transfer_member() {
        let mut state = state_with_members(&[3]);
        state.create_party(member_at_level("f", 1)).unwrap();
        state.transfer_member(0, "m0", 1).unwrap();
        assert_eq!(state.parties[0].len(), 1);
        assert_eq!(state.parties[1].len(), 2);
        assert_eq!(state.find_member("m0").map(|(id, _)| id), Some(1));
    }

    #[test]
    fn test_transfer_to_unknown_party_keeps_member() {
        let mut state = state_with_members(&[3]);
        assert_eq!(
            state.transfer_member(0, "m0", 5),
            Err(GameError::PartyNotFound(5))
        );
        assert!(state.parties[0].contains("m0"));
    }

    #[test]
    fn test_rehydrate_recomputes_members() {
        let state = state_with_members(&[10]);
        let bytes = bincode::serialize(&state).unwrap();
        let mut loaded: GameState = bincode::deserialize(&bytes).unwrap();
        loaded.history.highest_level = 0;
        loaded.rehydrate();
        assert!(loaded.all_members().all(|m| m.stats_are_current()));
        assert_eq!(loaded.history.highest_level, 10);
    }
}
