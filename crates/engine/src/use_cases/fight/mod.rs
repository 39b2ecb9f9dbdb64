//! Fights between players and bots.

mod attack_bot;
mod current_fight;
mod error;
mod location_bots;


pub use attack_bot::{AttackBot, AttackOutcome};
pub use current_fight::{CurrentFight, GetCurrentFight};
pub use error::FightError;
pub use location_bots::ListLocationBots;
