//! Derived combat stat computation.
//!
//! Derived stats are a pure function of base stats plus equipped item
//! contributions. Callers recompute and persist them whenever equipment
//! changes so reads never have to fold over the inventory.

use serde::{Deserialize, Serialize};

use crate::entities::EquipmentItem;

/// Attack, defense, and maximum hit points as one block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack: i64,
    pub defense: i64,
    pub hp: i64,
}

impl CombatStats {
    /// Starting values for a fresh character.
    pub const BASE: CombatStats = CombatStats {
        attack: 1,
        defense: 1,
        hp: 20,
    };

    pub fn new(attack: i64, defense: i64, hp: i64) -> Self {
        Self {
            attack,
            defense,
            hp,
        }
    }
}

impl std::ops::Add for CombatStats {
    type Output = CombatStats;

    fn add(self, rhs: CombatStats) -> CombatStats {
        CombatStats {
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
            hp: self.hp + rhs.hp,
        }
    }
}

/// Fold base stats and equipped item contributions into the derived block.
pub fn combat_stats(base: CombatStats, equipped: &[EquipmentItem]) -> CombatStats {
    equipped
        .iter()
        .fold(base, |acc, item| acc + item.contribution())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EquipmentCategory, SlotKind};

    fn item(attack: i64, defense: i64, hp: i64, kind: SlotKind) -> EquipmentItem {
        let category = EquipmentCategory::new("test", kind);
        let mut item = EquipmentItem::new("test", "test", category.id);
        item.attack = attack;
        item.defense = defense;
        item.hp = hp;
        item
    }

    #[test]
    fn bare_character_keeps_base_stats() {
        let stats = combat_stats(CombatStats::BASE, &[]);
        assert_eq!(stats, CombatStats::new(1, 1, 20));
    }

    #[test]
    fn single_weapon_adds_its_contribution() {
        let sword = item(10, 5, 20, SlotKind::Weapon);
        let stats = combat_stats(CombatStats::BASE, &[sword]);
        assert_eq!(stats, CombatStats::new(11, 6, 40));
    }

    #[test]
    fn replacing_a_weapon_replaces_its_contribution() {
        let better = item(15, 8, 25, SlotKind::Weapon);
        let stats = combat_stats(CombatStats::BASE, &[better]);
        assert_eq!(stats, CombatStats::new(16, 9, 45));
    }

    #[test]
    fn contributions_stack_across_slots() {
        let sword = item(10, 0, 0, SlotKind::Weapon);
        let mail = item(0, 15, 30, SlotKind::Chest);
        let stats = combat_stats(CombatStats::BASE, &[sword, mail]);
        assert_eq!(stats, CombatStats::new(11, 16, 50));
    }
}
