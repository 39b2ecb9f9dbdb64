//! Equipment catalog entities.
//!
//! Catalog items are immutable after creation and shared read-only by every
//! component. An item's category decides which body slot it occupies.

use serde::{Deserialize, Serialize};

use crate::entities::player::EquipSlot;
use crate::error::DomainError;
use crate::ids::{CategoryId, ItemId};
use crate::stats::CombatStats;

/// A purchasable, equippable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: ItemId,
    pub name: String,
    pub slug: String,
    /// Contribution to the wearer's derived attack.
    pub attack: i64,
    /// Contribution to the wearer's derived defense.
    pub defense: i64,
    /// Contribution to the wearer's derived max hit points.
    pub hp: i64,
    pub required_level: i64,
    pub price: i64,
    /// Rare-drop catalog flag.
    pub artifact: bool,
    pub category_id: CategoryId,
}

impl EquipmentItem {
    pub fn new(name: impl Into<String>, slug: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            slug: slug.into(),
            attack: 0,
            defense: 0,
            hp: 0,
            required_level: 1,
            price: 0,
            artifact: false,
            category_id,
        }
    }

    /// The stat block this item adds while equipped.
    pub fn contribution(&self) -> CombatStats {
        CombatStats {
            attack: self.attack,
            defense: self.defense,
            hp: self.hp,
        }
    }
}

/// A named family of equipment sharing one slot kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCategory {
    pub id: CategoryId,
    pub name: String,
    pub kind: SlotKind,
}

impl EquipmentCategory {
    pub fn new(name: impl Into<String>, kind: SlotKind) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind,
        }
    }
}

/// The slot family a category maps to.
///
/// Every kind except `Ring` owns exactly one body slot. Rings share four
/// interchangeable slots; slot selection for them lives on the player's
/// slot block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
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
    Ring,
}

impl SlotKind {
    /// The fixed body slot for this kind, or `None` for the ring family.
    pub fn fixed_slot(&self) -> Option<EquipSlot> {
        match self {
            Self::Chest => Some(EquipSlot::Chest),
            Self::Belt => Some(EquipSlot::Belt),
            Self::Head => Some(EquipSlot::Head),
            Self::Neck => Some(EquipSlot::Neck),
            Self::Weapon => Some(EquipSlot::Weapon),
            Self::Shield => Some(EquipSlot::Shield),
            Self::Legs => Some(EquipSlot::Legs),
            Self::Feet => Some(EquipSlot::Feet),
            Self::Arms => Some(EquipSlot::Arms),
            Self::Hands => Some(EquipSlot::Hands),
            Self::Ring => None,
        }
    }

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
            Self::Ring => "ring",
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SlotKind {
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
            "ring" => Ok(Self::Ring),
            other => Err(DomainError::parse(format!(
                "unknown equipment kind: {other}"
            ))),
        }
    }
}
