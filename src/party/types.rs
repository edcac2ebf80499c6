use super::aggregate::{
    combat_effectiveness, count_active, count_strong, party_strength, CombatEffectiveness,
};
use crate::character::fusion::calculate_fusion_result;
use crate::character::member::Member;
use crate::core::constants::{FUSION_MIN_PARTY_SIZE, MAX_STAMINA};
use crate::core::error::GameError;
use crate::items::InventoryItem;
use serde::{Deserialize, Serialize};

/// Where a party is and where it is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyLocation {
    pub area_id: u32,
    pub target_area_id: u32,
    /// In transit parties produce nothing
    pub moving: bool,
}

impl PartyLocation {
    pub fn at(area_id: u32) -> Self {
        Self {
            area_id,
            target_area_id: area_id,
            moving: false,
        }
    }
}

/// An ordered, never-empty roster sharing one location and inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: u32,
    pub name: String,
    members: Vec<Member>,
    pub items: Vec<InventoryItem>,
    pub location: PartyLocation,
}

impl Party {
    pub fn new(id: u32, name: String, founder: Member, area_id: u32) -> Self {
        Self {
            id,
            name,
            members: vec![founder],
            items: Vec::new(),
            location: PartyLocation::at(area_id),
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn member_mut(&mut self, member_id: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id == member_id)
    }

    pub fn contains(&self, member_id: &str) -> bool {
        self.member(member_id).is_some()
    }

    fn index_of(&self, member_id: &str) -> Result<usize, GameError> {
        self.members
            .iter()
            .position(|m| m.id == member_id)
            .ok_or_else(|| GameError::MemberNotFound(member_id.to_string()))
    }

    // ── Roster ──────────────────────────────────────────────────

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Removes a member. Refused for equipped members and for the last member.
    pub fn remove_member(&mut self, member_id: &str) -> Result<Member, GameError> {
        let index = self.index_of(member_id)?;
        if self.members[index].is_equipped() {
            return Err(GameError::Equipped(member_id.to_string()));
        }
        if self.members.len() <= 1 {
            return Err(GameError::LastMember);
        }
        Ok(self.members.remove(index))
    }

    /// Fuses `sacrifice_id` into `base_id`. The result takes the base's place
    /// in the roster and the sacrifice is gone.
    pub fn fuse_members(&mut self, base_id: &str, sacrifice_id: &str) -> Result<&Member, GameError> {
        let base_index = self.index_of(base_id)?;
        let sacrifice_index = self.index_of(sacrifice_id)?;
        if base_index == sacrifice_index {
            return Err(GameError::SelfFusion);
        }
        for index in [base_index, sacrifice_index] {
            if self.members[index].is_equipped() {
                return Err(GameError::Equipped(self.members[index].id.clone()));
            }
        }
        if self.members.len() - 1 < FUSION_MIN_PARTY_SIZE {
            return Err(GameError::PartyTooSmallToFuse {
                min: FUSION_MIN_PARTY_SIZE,
            });
        }

        let fused = calculate_fusion_result(&self.members[base_index], &self.members[sacrifice_index]);
        self.members[base_index] = fused;
        self.members.remove(sacrifice_index);

        let new_index = if sacrifice_index < base_index {
            base_index - 1
        } else {
            base_index
        };
        Ok(&self.members[new_index])
    }

    /// Flips a member's active flag and returns the new value.
    pub fn toggle_active(&mut self, member_id: &str) -> Result<bool, GameError> {
        let index = self.index_of(member_id)?;
        let member = &mut self.members[index];
        member.active = !member.active;
        Ok(member.active)
    }

    pub fn rename_member(&mut self, member_id: &str, name: String) -> Result<(), GameError> {
        let index = self.index_of(member_id)?;
        self.members[index].name = name;
        Ok(())
    }

    /// +`amount` stamina for every active member below max.
    pub fn regenerate_stamina(&mut self, amount: i32) {
        for member in self.members.iter_mut() {
            if member.active && member.stamina() < MAX_STAMINA {
                member.add_stamina(amount);
            }
        }
    }

    // ── Travel ──────────────────────────────────────────────────

    /// Starts moving toward `area_id`. Moving to the current area is a no-op.
    pub fn move_to(&mut self, area_id: u32) {
        if area_id == self.location.area_id && !self.location.moving {
            return;
        }
        self.location.target_area_id = area_id;
        self.location.moving = true;
    }

    /// Lands at the destination.
    pub fn arrive(&mut self) {
        self.location.area_id = self.location.target_area_id;
        self.location.moving = false;
    }

    pub fn is_moving(&self) -> bool {
        self.location.moving
    }

    // ── Aggregates ──────────────────────────────────────────────

    pub fn strength(&self) -> f64 {
        party_strength(&self.members)
    }

    pub fn effectiveness(&self) -> CombatEffectiveness {
        combat_effectiveness(&self.members)
    }

    pub fn count_active(&self) -> usize {
        count_active(&self.members)
    }

    pub fn count_strong(&self, difficulty: u64) -> usize {
        count_strong(&self.members, difficulty)
    }

    pub fn highest_level(&self) -> u64 {
        self.members.iter().map(|m| m.level()).max().unwrap_or(0)
    }

    /// Recomputes every member's derived stats after a load.
    pub(crate) fn rehydrate(&mut self) {
        for member in self.members.iter_mut() {
            member.rehydrate();
        }
    }

    /// Only a malformed loaded party can be empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
