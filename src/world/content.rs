//! Content node definitions and the lookup seam the engine reads them through.

use super::data::get_all_areas;
use crate::items::{get_all_items, ItemDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Field,
    Town,
    Dungeon,
}

/// One entry of a node's drop table. Each entry is rolled independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    pub item_id: u32,
    /// Chance in [0, 1]
    pub probability: f64,
}

/// Static yield and difficulty of a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    pub id: u32,
    pub name: String,
    pub kind: NodeKind,
    pub difficulty: u64,
    /// Gold per tick before the strength multiplier
    pub give_gold: u64,
    /// Experience per tick before the strength multiplier
    pub give_exp: u64,
    pub drops: Vec<DropEntry>,
    /// Travel speed factor, 1.0 is normal
    pub speed_effect: f64,
}

/// Read-only content tables.
///
/// Unknown ids return `None` and the engine treats them as "no resources"
/// or a no-op, never as a fatal condition.
pub trait ContentLookup {
    fn content_node(&self, id: u32) -> Option<&ContentNode>;

    fn item_definition(&self, id: u32) -> Option<&ItemDefinition>;
}

/// In-memory content tables, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    nodes: HashMap<u32, ContentNode>,
    items: HashMap<u32, ItemDefinition>,
}

impl StaticContent {
    /// Empty tables. Every lookup misses until nodes and items are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in areas and items.
    pub fn builtin() -> Self {
        let mut content = Self::new();
        for node in get_all_areas() {
            content.insert_node(node);
        }
        for item in get_all_items() {
            content.insert_item(item);
        }
        content
    }

    pub fn insert_node(&mut self, node: ContentNode) {
        self.nodes.insert(node.id, node);
    }

    pub fn insert_item(&mut self, item: ItemDefinition) {
        self.items.insert(item.id, item);
    }

    pub fn with_node(mut self, node: ContentNode) -> Self {
        self.insert_node(node);
        self
    }

    pub fn node_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl ContentLookup for StaticContent {
    fn content_node(&self, id: u32) -> Option<&ContentNode> {
        self.nodes.get(&id)
    }

    fn item_definition(&self, id: u32) -> Option<&ItemDefinition> {
        self.items.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{STARTING_AREA_ID, TREASURE_ITEM_ID};

    #[test]
    fn test_builtin_has_starting_area_and_treasure() {
        let content = StaticContent::builtin();
        assert!(content.content_node(STARTING_AREA_ID).is_some());
        assert!(content.item_definition(TREASURE_ITEM_ID).is_some());
    }

    #[test]
    fn test_unknown_ids_are_absent() {
        let content = StaticContent::builtin();
        assert!(content.content_node(999).is_none());
        assert!(content.item_definition(999).is_none());
    }

    #[test]
    fn test_empty_content_misses_everything() {
        let content = StaticContent::new();
        assert!(content.content_node(STARTING_AREA_ID).is_none());
        assert!(content.node_ids().is_empty());
    }

    #[test]
    fn test_drop_tables_reference_known_items() {
        let content = StaticContent::builtin();
        for id in content.node_ids() {
            let node = content.content_node(id).unwrap();
            for entry in &node.drops {
                assert!(
                    content.item_definition(entry.item_id).is_some(),
                    "node {} drops unknown item {}",
                    id,
                    entry.item_id
                );
                assert!((0.0..=1.0).contains(&entry.probability));
            }
        }
    }
}
