//! Item definitions, built-in item data, and party inventories.

pub mod data;
pub mod inventory;
pub mod types;

pub use data::{get_all_items, get_item};
pub use inventory::{
    add_item, equip_item, sell_item, transfer_item, unequip_item, use_item, InventoryItem,
};
pub use types::{ItemDefinition, ItemEffect, ItemKind};
