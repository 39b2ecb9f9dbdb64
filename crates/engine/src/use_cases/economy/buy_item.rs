//! Buying an item from the catalog.

use std::sync::Arc;

use mirefell_domain::{EquipmentItem, PlayerId};

use crate::infrastructure::ports::StorePort;
use crate::use_cases::economy::EconomyError;

/// Purchases one catalog item into a player's inventory.
///
/// The gold deduction and the inventory insert land in one transaction;
/// a failure on either side leaves both untouched.
pub struct BuyItem {
    store: Arc<dyn StorePort>,
}

impl BuyItem {
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

        // 2. Load the buyer
        let player = tx
            .player_by_id(player_id)
            .await?
            .ok_or(EconomyError::PlayerNotFound)?;

        // 3. Price and duplicate checks; only the unequipped inventory
        //    counts as owned here
        if !player.can_afford(item.price) {
            return Err(EconomyError::InsufficientGold);
        }
        if tx.owns_item(player_id, item.id).await? {
            return Err(EconomyError::ItemAlreadyOwned);
        }

        // 4. Hand over the item and take the gold
        tx.insert_inventory_entry(player_id, item.id).await?;
        tx.set_gold(player_id, player.gold - item.price).await?;

        tx.commit().await?;

        tracing::info!(
            player_id = %player_id,
            item = %item.slug,
            price = item.price,
            "item bought"
        );

        Ok(item)
    }
}
