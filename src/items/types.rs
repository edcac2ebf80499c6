use crate::character::attributes::AttributeKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Consumable,
    Weapon,
    Armor,
    Accessory,
    Special,
    Treasure,
}

impl ItemKind {
    pub fn is_equippable(&self) -> bool {
        matches!(self, ItemKind::Weapon | ItemKind::Armor | ItemKind::Accessory)
    }
}

/// Parsed form of an item's `key:value` effect string.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEffect {
    /// Flat bonus to one derived stat while equipped ("str:5")
    StatBonus { kind: AttributeKind, amount: f64 },
    /// Restores stamina on use ("restoreStamina:10")
    RestoreStamina(i32),
    /// Credits the item's price as gold on use ("gold:variable")
    Gold,
    /// Anything the engine does not act on ("restoreHP:20", "key:mimir")
    Inert(String),
}

impl ItemEffect {
    pub fn parse(effect: &str) -> Self {
        let Some((key, value)) = effect.split_once(':') else {
            return ItemEffect::Inert(effect.to_string());
        };

        if let Some(kind) = AttributeKind::from_key(key) {
            if let Ok(amount) = value.parse::<f64>() {
                return ItemEffect::StatBonus { kind, amount };
            }
        }

        match key {
            "restoreStamina" => value
                .parse::<i32>()
                .map(ItemEffect::RestoreStamina)
                .unwrap_or_else(|_| ItemEffect::Inert(effect.to_string())),
            "gold" => ItemEffect::Gold,
            _ => ItemEffect::Inert(effect.to_string()),
        }
    }
}

/// Static item definition from the content tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: u32,
    pub name: String,
    pub kind: ItemKind,
    pub rarity: u8,
    /// Base sell price. Treasure items carry theirs per instance.
    pub price: u64,
    pub effect: String,
}

impl ItemDefinition {
    pub fn effect(&self) -> ItemEffect {
        ItemEffect::parse(&self.effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stat_bonus() {
        assert_eq!(
            ItemEffect::parse("str:5"),
            ItemEffect::StatBonus {
                kind: AttributeKind::Strength,
                amount: 5.0
            }
        );
        assert_eq!(
            ItemEffect::parse("mag:2.5"),
            ItemEffect::StatBonus {
                kind: AttributeKind::Magic,
                amount: 2.5
            }
        );
    }

    #[test]
    fn test_parse_use_effects() {
        assert_eq!(
            ItemEffect::parse("restoreStamina:10"),
            ItemEffect::RestoreStamina(10)
        );
        assert_eq!(ItemEffect::parse("gold:variable"), ItemEffect::Gold);
    }

    #[test]
    fn test_parse_unknown_effects_are_inert() {
        assert_eq!(
            ItemEffect::parse("restoreHP:20"),
            ItemEffect::Inert("restoreHP:20".to_string())
        );
        assert_eq!(
            ItemEffect::parse("str:lots"),
            ItemEffect::Inert("str:lots".to_string())
        );
        assert_eq!(ItemEffect::parse("nothing"), ItemEffect::Inert("nothing".to_string()));
    }

    #[test]
    fn test_equippable_kinds() {
        assert!(ItemKind::Weapon.is_equippable());
        assert!(ItemKind::Accessory.is_equippable());
        assert!(!ItemKind::Consumable.is_equippable());
        assert!(!ItemKind::Treasure.is_equippable());
    }
}
