//! Built-in area definitions.

use super::content::{ContentNode, DropEntry, NodeKind};

/// Returns every built-in area, starting area first.
pub fn get_all_areas() -> Vec<ContentNode> {
    vec![
        ContentNode {
            id: 16,
            name: "Idavoll Plain".to_string(),
            kind: NodeKind::Field,
            difficulty: 2,
            // A fresh starter has 0 strength and earns at the minimum
            // multiplier, so 1 would floor to nothing.
            give_gold: 2,
            give_exp: 2,
            drops: vec![],
            speed_effect: 1.0,
        },
        ContentNode {
            id: 12,
            name: "Asgard Village".to_string(),
            kind: NodeKind::Town,
            difficulty: 0,
            give_gold: 0,
            give_exp: 0,
            drops: vec![],
            speed_effect: 1.0,
        },
        ContentNode {
            id: 18,
            name: "Yggdrasil Forest".to_string(),
            kind: NodeKind::Field,
            difficulty: 5,
            give_gold: 2,
            give_exp: 3,
            drops: vec![DropEntry {
                item_id: 3,
                probability: 0.01,
            }],
            speed_effect: 0.8,
        },
        ContentNode {
            id: 25,
            name: "Mimir Cave".to_string(),
            kind: NodeKind::Dungeon,
            difficulty: 10,
            give_gold: 5,
            give_exp: 8,
            drops: vec![DropEntry {
                item_id: 4,
                probability: 0.02,
            }],
            speed_effect: 0.6,
        },
    ]
}

pub fn get_area(id: u32) -> Option<ContentNode> {
    get_all_areas().into_iter().find(|a| a.id == id)
}
