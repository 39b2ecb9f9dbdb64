//! Equipment economy errors.

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while buying, selling, and equipping items.
#[derive(Debug, thiserror::Error)]
pub enum EconomyError {
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Not enough gold")]
    InsufficientGold,
    #[error("Item already owned")]
    ItemAlreadyOwned,
    #[error("Item not owned")]
    ItemNotOwned,
    #[error("Item is not in the inventory")]
    ItemNotInInventory,
    #[error("Level too low for this item")]
    InsufficientLevel,
    #[error("Unknown equipment slot: {0}")]
    InvalidEquipmentSlot(String),
    #[error("No item equipped in this slot")]
    NoItemEquipped,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
