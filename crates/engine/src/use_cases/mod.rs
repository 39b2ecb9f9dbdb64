//! Use cases - player story orchestration.
//!
//! Each module covers one area of the game. Use cases orchestrate the
//! repository ports to fulfill one player action each.

pub mod economy;
pub mod fight;
pub mod movement;
pub mod players;
pub mod regen;
pub mod travel;

// Re-export main types
pub use economy::{BuyItem, EconomyError, ListInventory, SellItem, TakeOffItem, TakeOnItem};
pub use fight::{
    AttackBot, AttackOutcome, CurrentFight, FightError, GetCurrentFight, ListLocationBots,
};
pub use movement::{MovementError, MovementSessions};
pub use players::{CreatePlayer, GetPlayer, PlayerError};
pub use regen::HealthRegeneration;
pub use travel::{LocationGraph, MoveToLocation, TravelError, TravelToCell};
