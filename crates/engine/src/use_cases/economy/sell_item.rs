//! Selling an inventory item back to the catalog.

use std::sync::Arc;

use mirefell_domain::{EquipmentItem, PlayerId};

use crate::infrastructure::ports::StorePort;
use crate::use_cases::economy::EconomyError;

/// Sells one of a player's unequipped items for its full catalog price.
///
/// Equipped items cannot be sold directly; they have to be taken off
/// first, which puts them back into the inventory.
pub struct SellItem {
    store: Arc<dyn StorePort>,
}

impl SellItem {
    pub fn new(store: Arc<dyn StorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        player_id: PlayerId,
        item_slug: &str,
    ) -> Result<EquipmentItem, EconomyError> {
        let mut tx = self.store.begin().await?;

        // 1. Resolve the item
        let item = tx
            .item_by_slug(item_slug)
            .await?
            .ok_or_else(|| EconomyError::ItemNotFound(item_slug.to_owned()))?;

        // 2. The seller must actually hold it
        if !tx.owns_item(player_id, item.id).await? {
            return Err(EconomyError::ItemNotOwned);
        }

        // 3. Load the seller
        let player = tx
            .player_by_id(player_id)
            .await?
            .ok_or(EconomyError::PlayerNotFound)?;

        // 4. Pay out and remove the entry
        tx.set_gold(player_id, player.gold + item.price).await?;
        tx.remove_inventory_entry(player_id, item.id).await?;

        tx.commit().await?;

        tracing::info!(
            player_id = %player_id,
            item = %item.slug,
            price = item.price,
            "item sold"
        );

        Ok(item)
    }
}
