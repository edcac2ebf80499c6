//! Built-in item definitions.

use super::types::{ItemDefinition, ItemKind};
use crate::core::constants::TREASURE_ITEM_ID;

fn item(id: u32, name: &str, kind: ItemKind, rarity: u8, price: u64, effect: &str) -> ItemDefinition {
    ItemDefinition {
        id,
        name: name.to_string(),
        kind,
        rarity,
        price,
        effect: effect.to_string(),
    }
}

pub fn get_all_items() -> Vec<ItemDefinition> {
    vec![
        item(1, "Minor Healing Potion", ItemKind::Consumable, 1, 50, "restoreHP:20"),
        item(2, "Wooden Sword", ItemKind::Weapon, 1, 100, "str:5"),
        item(3, "Forest Herb", ItemKind::Consumable, 1, 30, "restoreStamina:10"),
        item(4, "Stone Fragment", ItemKind::Special, 2, 200, "key:mimir"),
        // Price is set per instance from offline earnings
        item(TREASURE_ITEM_ID, "Treasure Chest", ItemKind::Treasure, 3, 0, "gold:variable"),
    ]
}

pub fn get_item(id: u32) -> Option<ItemDefinition> {
    get_all_items().into_iter().find(|i| i.id == id)
}
