pub mod entities;
pub mod error;
pub mod ids;
pub mod progression;
pub mod stats;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    BodyPart, Bot, EquipSlot, EquipmentCategory, EquipmentItem, EquipmentSlots, Fight,
    FightStatus, Location, LocationLink, MovementSession, MovementStatus, MovementStep, Player,
    Round, SlotKind,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{BotId, CategoryId, FightId, ItemId, LocationId, MovementId, PlayerId, RoundId};

pub use progression::{reached_new_level, required_experience};
pub use stats::{combat_stats, CombatStats};
