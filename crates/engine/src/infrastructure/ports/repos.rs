//! Repository port traits for database access.

use async_trait::async_trait;
use mirefell_domain::{
    Bot, BotId, EquipmentCategory, EquipmentItem, Fight, ItemId, Location, LocationId,
    LocationLink, MovementId, MovementSession, MovementStep, Player, PlayerId,
};

use super::error::RepoError;

// =============================================================================
// Database Ports (one per entity type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Player>, RepoError>;
    async fn create(&self, player: &Player) -> Result<(), RepoError>;
    async fn update_location(&self, id: PlayerId, location_id: LocationId)
        -> Result<(), RepoError>;

    /// Set-based heal of every wounded player: raise current hp by `percent`
    /// of max (at least 1 point), never past max. Returns rows touched.
    async fn regenerate_health(&self, percent: i64) -> Result<u64, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepo: Send + Sync {
    async fn get(&self, id: ItemId) -> Result<Option<EquipmentItem>, RepoError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<EquipmentItem>, RepoError>;
    async fn create(&self, item: &EquipmentItem) -> Result<(), RepoError>;
    async fn create_category(&self, category: &EquipmentCategory) -> Result<(), RepoError>;

    /// A player's unequipped items, joined against the catalog.
    async fn list_inventory(&self, player_id: PlayerId) -> Result<Vec<EquipmentItem>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepo: Send + Sync {
    async fn get(&self, id: LocationId) -> Result<Option<Location>, RepoError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, RepoError>;
    async fn list_active(&self) -> Result<Vec<Location>, RepoError>;
    async fn list_links(&self) -> Result<Vec<LocationLink>, RepoError>;
    async fn are_linked(&self, a: LocationId, b: LocationId) -> Result<bool, RepoError>;
    async fn create(&self, location: &Location) -> Result<(), RepoError>;
    async fn link(&self, from: LocationId, to: LocationId) -> Result<(), RepoError>;
    async fn has_bot(&self, location_id: LocationId, bot_id: BotId) -> Result<bool, RepoError>;
    async fn place_bot(&self, location_id: LocationId, bot_id: BotId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BotRepo: Send + Sync {
    async fn get(&self, id: BotId) -> Result<Option<Bot>, RepoError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Bot>, RepoError>;
    async fn list_at_location(&self, location_id: LocationId) -> Result<Vec<Bot>, RepoError>;
    async fn create(&self, bot: &Bot) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FightRepo: Send + Sync {
    /// The newest in-progress fight for a player, if any.
    async fn find_active_by_player(&self, player_id: PlayerId)
        -> Result<Option<Fight>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovementRepo: Send + Sync {
    async fn create_session(&self, session: &MovementSession) -> Result<(), RepoError>;
    async fn finish_session(&self, id: MovementId) -> Result<(), RepoError>;
    async fn get_session(&self, id: MovementId) -> Result<Option<MovementSession>, RepoError>;

    /// Persist one traversal step and move the player to its destination.
    /// The two writes land together or not at all.
    async fn record_step(&self, step: &MovementStep, player_id: PlayerId)
        -> Result<(), RepoError>;
}
