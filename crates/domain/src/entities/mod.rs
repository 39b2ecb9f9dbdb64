//! Domain entities - Core game objects with identity

mod bot;
mod fight;
mod item;
mod location;
mod movement;
mod player;

pub use bot::Bot;
pub use fight::{BodyPart, Fight, FightStatus, Round};
pub use item::{EquipmentCategory, EquipmentItem, SlotKind};
pub use location::{Location, LocationLink};
pub use movement::{MovementSession, MovementStatus, MovementStep};
pub use player::{EquipSlot, EquipmentSlots, Player};
