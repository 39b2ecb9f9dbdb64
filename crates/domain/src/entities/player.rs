//! Player entity and the fourteen-slot equipment block.

use serde::{Deserialize, Serialize};

use crate::entities::item::SlotKind;
use crate::error::DomainError;
use crate::ids::{ItemId, LocationId, PlayerId};
use crate::stats::CombatStats;

/// One of the fourteen body slots a player can equip into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipSlot {
    Chest,
    Belt,
    Head,
    Neck,
    Weapon,
    Shield,
    Legs,
    Feet,
    Arms,
    Hands,
    Ring1,
    Ring2,
    Ring3,
    Ring4,
}

impl EquipSlot {
    /// All slots, in catalog order.
    pub const ALL: [EquipSlot; 14] = [
        EquipSlot::Chest,
        EquipSlot::Belt,
        EquipSlot::Head,
        EquipSlot::Neck,
        EquipSlot::Weapon,
        EquipSlot::Shield,
        EquipSlot::Legs,
        EquipSlot::Feet,
        EquipSlot::Arms,
        EquipSlot::Hands,
        EquipSlot::Ring1,
        EquipSlot::Ring2,
        EquipSlot::Ring3,
        EquipSlot::Ring4,
    ];

    /// Ring slots in fill order.
    pub const RINGS: [EquipSlot; 4] = [
        EquipSlot::Ring1,
        EquipSlot::Ring2,
        EquipSlot::Ring3,
        EquipSlot::Ring4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Belt => "belt",
            Self::Head => "head",
            Self::Neck => "neck",
            Self::Weapon => "weapon",
            Self::Shield => "shield",
            Self::Legs => "legs",
            Self::Feet => "feet",
            Self::Arms => "arms",
            Self::Hands => "hands",
            Self::Ring1 => "ring1",
            Self::Ring2 => "ring2",
            Self::Ring3 => "ring3",
            Self::Ring4 => "ring4",
        }
    }
}

impl std::fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chest" => Ok(Self::Chest),
            "belt" => Ok(Self::Belt),
            "head" => Ok(Self::Head),
            "neck" => Ok(Self::Neck),
            "weapon" => Ok(Self::Weapon),
            "shield" => Ok(Self::Shield),
            "legs" => Ok(Self::Legs),
            "feet" => Ok(Self::Feet),
            "arms" => Ok(Self::Arms),
            "hands" => Ok(Self::Hands),
            "ring1" => Ok(Self::Ring1),
            "ring2" => Ok(Self::Ring2),
            "ring3" => Ok(Self::Ring3),
            "ring4" => Ok(Self::Ring4),
            other => Err(DomainError::parse(format!("unknown equip slot: {other}"))),
        }
    }
}

/// What a player currently wears, one optional item per body slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSlots {
    pub chest: Option<ItemId>,
    pub belt: Option<ItemId>,
    pub head: Option<ItemId>,
    pub neck: Option<ItemId>,
    pub weapon: Option<ItemId>,
    pub shield: Option<ItemId>,
    pub legs: Option<ItemId>,
    pub feet: Option<ItemId>,
    pub arms: Option<ItemId>,
    pub hands: Option<ItemId>,
    pub ring1: Option<ItemId>,
    pub ring2: Option<ItemId>,
    pub ring3: Option<ItemId>,
    pub ring4: Option<ItemId>,
}

impl EquipmentSlots {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<ItemId> {
        match slot {
            EquipSlot::Chest => self.chest,
            EquipSlot::Belt => self.belt,
            EquipSlot::Head => self.head,
            EquipSlot::Neck => self.neck,
            EquipSlot::Weapon => self.weapon,
            EquipSlot::Shield => self.shield,
            EquipSlot::Legs => self.legs,
            EquipSlot::Feet => self.feet,
            EquipSlot::Arms => self.arms,
            EquipSlot::Hands => self.hands,
            EquipSlot::Ring1 => self.ring1,
            EquipSlot::Ring2 => self.ring2,
            EquipSlot::Ring3 => self.ring3,
            EquipSlot::Ring4 => self.ring4,
        }
    }

    pub fn set(&mut self, slot: EquipSlot, item: Option<ItemId>) {
        match slot {
            EquipSlot::Chest => self.chest = item,
            EquipSlot::Belt => self.belt = item,
            EquipSlot::Head => self.head = item,
            EquipSlot::Neck => self.neck = item,
            EquipSlot::Weapon => self.weapon = item,
            EquipSlot::Shield => self.shield = item,
            EquipSlot::Legs => self.legs = item,
            EquipSlot::Feet => self.feet = item,
            EquipSlot::Arms => self.arms = item,
            EquipSlot::Hands => self.hands = item,
            EquipSlot::Ring1 => self.ring1 = item,
            EquipSlot::Ring2 => self.ring2 = item,
            EquipSlot::Ring3 => self.ring3 = item,
            EquipSlot::Ring4 => self.ring4 = item,
        }
    }

    /// Ids of all currently equipped items, in slot order.
    pub fn equipped_ids(&self) -> Vec<ItemId> {
        EquipSlot::ALL
            .iter()
            .filter_map(|slot| self.get(*slot))
            .collect()
    }

    /// The slot this item occupies, if it is worn at all.
    pub fn slot_of(&self, item: ItemId) -> Option<EquipSlot> {
        EquipSlot::ALL
            .iter()
            .copied()
            .find(|slot| self.get(*slot) == Some(item))
    }

    /// The ring slot a new ring should land in.
    ///
    /// Rings fill ring1 through ring4 in order; once all four are taken
    /// the oldest position, ring1, is reused and its occupant displaced.
    pub fn ring_target(&self) -> EquipSlot {
        EquipSlot::RINGS
            .iter()
            .copied()
            .find(|slot| self.get(*slot).is_none())
            .unwrap_or(EquipSlot::Ring1)
    }

    /// Resolve the concrete slot an item of the given kind equips into.
    pub fn target_slot(&self, kind: SlotKind) -> EquipSlot {
        match kind.fixed_slot() {
            Some(slot) => slot,
            None => self.ring_target(),
        }
    }
}

/// A player character with progression, wealth, and equipment state.
///
/// `base_stats` are the raw trained values; `stats` are the derived values
/// after equipment contributions and are recomputed on every equipment
/// change rather than read back lazily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub level: i64,
    pub experience: i64,
    pub free_stat_points: i64,
    pub gold: i64,
    pub base_stats: CombatStats,
    pub stats: CombatStats,
    pub current_hp: i64,
    pub location_id: Option<LocationId>,
    pub slots: EquipmentSlots,
}

impl Player {
    pub fn new(username: impl Into<String>) -> Self {
        let base = CombatStats::BASE;
        Self {
            id: PlayerId::new(),
            username: username.into(),
            level: 1,
            experience: 0,
            free_stat_points: 10,
            gold: 0,
            base_stats: base,
            stats: base,
            current_hp: base.hp,
            location_id: None,
            slots: EquipmentSlots::empty(),
        }
    }

    /// Whether the player can afford the given price.
    pub fn can_afford(&self, price: i64) -> bool {
        self.gold >= price
    }

    /// Whether the player meets an item's level requirement.
    pub fn meets_level(&self, required_level: i64) -> bool {
        self.level >= required_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn slot_string_round_trip() {
        for slot in EquipSlot::ALL {
            assert_eq!(EquipSlot::from_str(slot.as_str()).ok(), Some(slot));
        }
        assert!(EquipSlot::from_str("ring5").is_err());
    }

    #[test]
    fn rings_fill_in_order() {
        let mut slots = EquipmentSlots::empty();
        assert_eq!(slots.ring_target(), EquipSlot::Ring1);

        slots.set(EquipSlot::Ring1, Some(ItemId::new()));
        assert_eq!(slots.ring_target(), EquipSlot::Ring2);

        slots.set(EquipSlot::Ring2, Some(ItemId::new()));
        slots.set(EquipSlot::Ring3, Some(ItemId::new()));
        assert_eq!(slots.ring_target(), EquipSlot::Ring4);
    }

    #[test]
    fn full_ring_set_reuses_first_slot() {
        let mut slots = EquipmentSlots::empty();
        for ring in EquipSlot::RINGS {
            slots.set(ring, Some(ItemId::new()));
        }
        assert_eq!(slots.ring_target(), EquipSlot::Ring1);
    }

    #[test]
    fn ring_gap_is_filled_before_later_slots() {
        let mut slots = EquipmentSlots::empty();
        for ring in EquipSlot::RINGS {
            slots.set(ring, Some(ItemId::new()));
        }
        slots.set(EquipSlot::Ring2, None);
        assert_eq!(slots.ring_target(), EquipSlot::Ring2);
    }

    #[test]
    fn target_slot_uses_kind_for_fixed_slots() {
        let slots = EquipmentSlots::empty();
        assert_eq!(slots.target_slot(SlotKind::Weapon), EquipSlot::Weapon);
        assert_eq!(slots.target_slot(SlotKind::Feet), EquipSlot::Feet);
        assert_eq!(slots.target_slot(SlotKind::Ring), EquipSlot::Ring1);
    }

    #[test]
    fn equipped_ids_reports_worn_items_only() {
        let mut slots = EquipmentSlots::empty();
        let sword = ItemId::new();
        let helm = ItemId::new();
        slots.set(EquipSlot::Weapon, Some(sword));
        slots.set(EquipSlot::Head, Some(helm));

        let worn = slots.equipped_ids();
        assert_eq!(worn.len(), 2);
        assert!(worn.contains(&sword));
        assert!(worn.contains(&helm));
        assert_eq!(slots.slot_of(sword), Some(EquipSlot::Weapon));
        assert_eq!(slots.slot_of(ItemId::new()), None);
    }

    #[test]
    fn new_player_starts_at_base() {
        let player = Player::new("astrid");
        assert_eq!(player.level, 1);
        assert_eq!(player.experience, 0);
        assert_eq!(player.stats, CombatStats::BASE);
        assert_eq!(player.current_hp, CombatStats::BASE.hp);
        assert!(player.slots.equipped_ids().is_empty());
    }
}
