//! Listing a player's unequipped items.

use std::sync::Arc;

use mirefell_domain::{EquipmentItem, PlayerId};

use crate::infrastructure::ports::{ItemRepo, PlayerRepo};
use crate::use_cases::economy::EconomyError;

/// Lists the items a player carries but does not wear, oldest first.
pub struct ListInventory {
    players: Arc<dyn PlayerRepo>,
    items: Arc<dyn ItemRepo>,
}

impl ListInventory {
    pub fn new(players: Arc<dyn PlayerRepo>, items: Arc<dyn ItemRepo>) -> Self {
        Self { players, items }
    }

    pub async fn execute(&self, player_id: PlayerId) -> Result<Vec<EquipmentItem>, EconomyError> {
        let player = self
            .players
            .get(player_id)
            .await?
            .ok_or(EconomyError::PlayerNotFound)?;

        Ok(self.items.list_inventory(player.id).await?)
    }
}
