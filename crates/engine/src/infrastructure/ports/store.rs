//! Transactional store port.
//!
//! Multi-row mutations (the economy operations, fight creation) go through
//! one `StoreTx` so every write lands atomically. A transaction that is
//! dropped without `commit` rolls back; adapters inherit that from their
//! underlying transaction handle.

use async_trait::async_trait;
use mirefell_domain::{
    CategoryId, CombatStats, EquipSlot, EquipmentCategory, EquipmentItem, Fight, ItemId, Player,
    PlayerId, Round,
};

use super::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorePort: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreTx: Send {
    async fn player_by_id(&mut self, id: PlayerId) -> Result<Option<Player>, RepoError>;
    async fn item_by_id(&mut self, id: ItemId) -> Result<Option<EquipmentItem>, RepoError>;
    async fn item_by_slug(&mut self, slug: &str) -> Result<Option<EquipmentItem>, RepoError>;
    async fn items_by_ids(&mut self, ids: &[ItemId]) -> Result<Vec<EquipmentItem>, RepoError>;
    async fn category_by_id(
        &mut self,
        id: CategoryId,
    ) -> Result<Option<EquipmentCategory>, RepoError>;

    async fn owns_item(&mut self, player_id: PlayerId, item_id: ItemId)
        -> Result<bool, RepoError>;
    async fn insert_inventory_entry(
        &mut self,
        player_id: PlayerId,
        item_id: ItemId,
    ) -> Result<(), RepoError>;
    async fn remove_inventory_entry(
        &mut self,
        player_id: PlayerId,
        item_id: ItemId,
    ) -> Result<(), RepoError>;

    async fn set_equipment_slot(
        &mut self,
        player_id: PlayerId,
        slot: EquipSlot,
        item: Option<ItemId>,
    ) -> Result<(), RepoError>;
    async fn set_gold(&mut self, player_id: PlayerId, gold: i64) -> Result<(), RepoError>;
    async fn set_combat_stats(
        &mut self,
        player_id: PlayerId,
        stats: CombatStats,
    ) -> Result<(), RepoError>;

    async fn insert_fight(&mut self, fight: &Fight) -> Result<(), RepoError>;
    async fn insert_round(&mut self, round: &Round) -> Result<(), RepoError>;

    /// Consume the transaction. Calling any method afterwards is an error.
    async fn commit(&mut self) -> Result<(), RepoError>;
}
