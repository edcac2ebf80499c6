//! Per-party item instances and the operations on them.
//!
//! Equipped items cannot be used, sold or transferred until unequipped.

use super::types::{ItemDefinition, ItemEffect};
use crate::core::constants::TREASURE_ITEM_ID;
use crate::core::error::GameError;
use crate::core::game_state::GameState;
use crate::party::Party;
use crate::world::ContentLookup;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One owned copy of an item definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub instance_id: String,
    pub item_id: u32,
    /// Member id wearing this item
    pub equipped_by: Option<String>,
    /// Per-instance price, used by treasure chests
    pub price_override: Option<u64>,
}

impl InventoryItem {
    pub fn new(item_id: u32) -> Self {
        Self {
            instance_id: uuid::Uuid::new_v4().to_string(),
            item_id,
            equipped_by: None,
            price_override: None,
        }
    }

    /// A treasure chest worth `value` gold.
    pub fn treasure(value: u64) -> Self {
        Self {
            price_override: Some(value),
            ..Self::new(TREASURE_ITEM_ID)
        }
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped_by.is_some()
    }

    pub fn price(&self, definition: &ItemDefinition) -> u64 {
        self.price_override.unwrap_or(definition.price)
    }
}

fn find_item<'a>(party: &'a Party, instance_id: &str) -> Result<&'a InventoryItem, GameError> {
    party
        .items
        .iter()
        .find(|i| i.instance_id == instance_id)
        .ok_or_else(|| GameError::ItemNotFound(instance_id.to_string()))
}

fn item_index(party: &Party, instance_id: &str) -> Result<usize, GameError> {
    party
        .items
        .iter()
        .position(|i| i.instance_id == instance_id)
        .ok_or_else(|| GameError::ItemNotFound(instance_id.to_string()))
}

/// Looks up an unequipped item and its definition.
fn unequipped_item<'a>(
    state: &GameState,
    content: &'a impl ContentLookup,
    party_id: u32,
    instance_id: &str,
) -> Result<(InventoryItem, &'a ItemDefinition), GameError> {
    let item = find_item(state.party(party_id)?, instance_id)?;
    if item.is_equipped() {
        return Err(GameError::ItemEquipped(instance_id.to_string()));
    }
    let definition = content
        .item_definition(item.item_id)
        .ok_or(GameError::UnknownItem(item.item_id))?;
    Ok((item.clone(), definition))
}

fn take_item(state: &mut GameState, party_id: u32, instance_id: &str) -> Result<InventoryItem, GameError> {
    let party = state.party_mut(party_id)?;
    let index = item_index(party, instance_id)?;
    Ok(party.items.remove(index))
}

/// Puts an item instance in a party inventory and marks the item as found.
pub fn add_item(state: &mut GameState, party_id: u32, item: InventoryItem) -> Result<String, GameError> {
    let item_id = item.item_id;
    let instance_id = item.instance_id.clone();
    state.party_mut(party_id)?.items.push(item);
    state.found_items.insert(item_id);
    Ok(instance_id)
}

/// Equips an item on a member of the same party, swapping out whatever the
/// member wore. The item's stat bonus becomes an additive modifier.
pub fn equip_item(
    state: &mut GameState,
    content: &impl ContentLookup,
    party_id: u32,
    instance_id: &str,
    member_id: &str,
) -> Result<(), GameError> {
    let (item, definition) = unequipped_item(state, content, party_id, instance_id)?;
    if !definition.kind.is_equippable() {
        return Err(GameError::NotEquippable(item.item_id));
    }
    let previous = state.member(party_id, member_id)?.equipment.clone();

    if let Some(previous) = previous {
        unequip_item(state, content, party_id, &previous)?;
    }

    let party = state.party_mut(party_id)?;
    let index = item_index(party, instance_id)?;
    party.items[index].equipped_by = Some(member_id.to_string());
    let member = party
        .member_mut(member_id)
        .ok_or_else(|| GameError::MemberNotFound(member_id.to_string()))?;
    if let ItemEffect::StatBonus { kind, amount } = definition.effect() {
        let mut modifiers = member.modifiers();
        modifiers.additive[kind.index()] += amount;
        member.set_modifiers(modifiers);
    }
    member.equipment = Some(instance_id.to_string());

    debug!(party_id, instance_id, member_id, "item equipped");
    Ok(())
}

/// Takes an item off its wearer and reverses its stat bonus.
pub fn unequip_item(
    state: &mut GameState,
    content: &impl ContentLookup,
    party_id: u32,
    instance_id: &str,
) -> Result<(), GameError> {
    let party = state.party_mut(party_id)?;
    let index = item_index(party, instance_id)?;
    let item = &mut party.items[index];
    let Some(member_id) = item.equipped_by.take() else {
        return Err(GameError::ItemNotEquipped(instance_id.to_string()));
    };
    let item_id = item.item_id;

    if let Some(member) = party.member_mut(&member_id) {
        if let Some(ItemEffect::StatBonus { kind, amount }) =
            content.item_definition(item_id).map(|d| d.effect())
        {
            let mut modifiers = member.modifiers();
            modifiers.additive[kind.index()] -= amount;
            member.set_modifiers(modifiers);
        }
        member.equipment = None;
    }

    debug!(party_id, instance_id, member_id = member_id.as_str(), "item unequipped");
    Ok(())
}

/// Consumes an item. Treasure credits its price as gold; stamina items need
/// a target member.
pub fn use_item(
    state: &mut GameState,
    content: &impl ContentLookup,
    party_id: u32,
    instance_id: &str,
    target: Option<&str>,
) -> Result<(), GameError> {
    let (item, definition) = unequipped_item(state, content, party_id, instance_id)?;

    match definition.effect() {
        ItemEffect::Gold => {
            let value = item.price(definition);
            take_item(state, party_id, instance_id)?;
            state.earn_gold(value);
            info!(party_id, gold = value, "treasure opened");
        }
        ItemEffect::RestoreStamina(amount) => {
            let member_id = target.ok_or(GameError::TargetRequired(item.item_id))?;
            state.member(party_id, member_id)?;
            take_item(state, party_id, instance_id)?;
            state.add_stamina(party_id, member_id, amount)?;
        }
        ItemEffect::StatBonus { .. } | ItemEffect::Inert(_) => {
            return Err(GameError::NotUsable(item.item_id));
        }
    }
    Ok(())
}

/// Sells an item for its price. Returns the gold credited.
pub fn sell_item(
    state: &mut GameState,
    content: &impl ContentLookup,
    party_id: u32,
    instance_id: &str,
) -> Result<u64, GameError> {
    let (item, definition) = unequipped_item(state, content, party_id, instance_id)?;
    let value = item.price(definition);
    take_item(state, party_id, instance_id)?;
    state.earn_gold(value);
    Ok(value)
}

/// Moves an unequipped item into another party's inventory.
pub fn transfer_item(
    state: &mut GameState,
    from_party: u32,
    instance_id: &str,
    to_party: u32,
) -> Result<(), GameError> {
    state.party(to_party)?;
    if find_item(state.party(from_party)?, instance_id)?.is_equipped() {
        return Err(GameError::ItemEquipped(instance_id.to_string()));
    }
    let item = take_item(state, from_party, instance_id)?;
    state.party_mut(to_party)?.items.push(item);
    Ok(())
}
