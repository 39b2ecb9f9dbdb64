//! Equipping an inventory item into a body slot.

use std::sync::Arc;

use mirefell_domain::{combat_stats, EquipSlot, ItemId, PlayerId};

use crate::infrastructure::ports::{RepoError, StorePort};
use crate::use_cases::economy::EconomyError;

/// Moves an item from the inventory into the slot its category dictates.
///
/// A displaced occupant goes back into the inventory, rings fill their
/// four slots in order, and the player's derived stats are recomputed
/// from the full equipped set before the transaction commits.
pub struct TakeOnItem {
    store: Arc<dyn StorePort>,
}

impl TakeOnItem {
    pub fn new(store: Arc<dyn StorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        player_id: PlayerId,
        item_id: ItemId,
    ) -> Result<EquipSlot, EconomyError> {
        let mut tx = self.store.begin().await?;

        // 1. Load the player
        let mut player = tx
            .player_by_id(player_id)
            .await?
            .ok_or(EconomyError::PlayerNotFound)?;

        // 2. The item must be in the inventory
        if !tx.owns_item(player_id, item_id).await? {
            return Err(EconomyError::ItemNotInInventory);
        }

        // 3. The item and its category decide the destination slot
        let item = tx
            .item_by_id(item_id)
            .await?
            .ok_or_else(|| EconomyError::ItemNotFound(item_id.to_string()))?;
        let category = tx
            .category_by_id(item.category_id)
            .await?
            .ok_or_else(|| RepoError::not_found("equipment_category", item.category_id))?;

        // 4. Level requirement
        if !player.meets_level(item.required_level) {
            return Err(EconomyError::InsufficientLevel);
        }

        // 5. Resolve the slot; an occupant is displaced back into the
        //    inventory
        let slot = player.slots.target_slot(category.kind);
        if let Some(displaced) = player.slots.get(slot) {
            tx.insert_inventory_entry(player_id, displaced).await?;
        }

        // 6. Move the item out of the inventory and into the slot
        tx.remove_inventory_entry(player_id, item_id).await?;
        tx.set_equipment_slot(player_id, slot, Some(item_id)).await?;
        player.slots.set(slot, Some(item_id));

        // 7. Recompute derived stats from the new equipped set
        let equipped = tx.items_by_ids(&player.slots.equipped_ids()).await?;
        let stats = combat_stats(player.base_stats, &equipped);
        tx.set_combat_stats(player_id, stats).await?;

        tx.commit().await?;

        tracing::info!(
            player_id = %player_id,
            item = %item.slug,
            slot = %slot,
            "item equipped"
        );

        Ok(slot)
    }
}
