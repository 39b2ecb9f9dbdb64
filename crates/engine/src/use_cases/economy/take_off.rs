//! Unequipping an item from a body slot.

use std::str::FromStr;
use std::sync::Arc;

use mirefell_domain::{combat_stats, EquipSlot, EquipmentItem, PlayerId};

use crate::infrastructure::ports::{RepoError, StorePort};
use crate::use_cases::economy::EconomyError;

/// Takes whatever sits in the named slot and returns it to the inventory,
/// recomputing derived stats from the remaining equipped set.
pub struct TakeOffItem {
    store: Arc<dyn StorePort>,
}

impl TakeOffItem {
    pub fn new(store: Arc<dyn StorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        player_id: PlayerId,
        slot_name: &str,
    ) -> Result<EquipmentItem, EconomyError> {
        let slot = EquipSlot::from_str(slot_name)
            .map_err(|_| EconomyError::InvalidEquipmentSlot(slot_name.to_owned()))?;

        let mut tx = self.store.begin().await?;

        // 1. Load the player
        let mut player = tx
            .player_by_id(player_id)
            .await?
            .ok_or(EconomyError::PlayerNotFound)?;

        // 2. Something must be worn there
        let item_id = player.slots.get(slot).ok_or(EconomyError::NoItemEquipped)?;
        let item = tx
            .item_by_id(item_id)
            .await?
            .ok_or_else(|| RepoError::not_found("equipment_item", item_id))?;

        // 3. Back into the inventory, slot freed
        tx.insert_inventory_entry(player_id, item_id).await?;
        tx.set_equipment_slot(player_id, slot, None).await?;
        player.slots.set(slot, None);

        // 4. Recompute derived stats from what is still worn
        let equipped = tx.items_by_ids(&player.slots.equipped_ids()).await?;
        let stats = combat_stats(player.base_stats, &equipped);
        tx.set_combat_stats(player_id, stats).await?;

        tx.commit().await?;

        tracing::info!(
            player_id = %player_id,
            item = %item.slug,
            slot = %slot,
            "item taken off"
        );

        Ok(item)
    }
}
