//! Direct movement into an adjacent location.

use std::sync::Arc;

use mirefell_domain::entities::Location;
use mirefell_domain::PlayerId;

use crate::infrastructure::ports::{LocationRepo, PlayerRepo};
use crate::use_cases::travel::TravelError;

/// Moves a player straight into a neighbouring location.
///
/// Used for town-style destinations where traversal is instant; timed
/// cell walking goes through [`crate::use_cases::travel::TravelToCell`].
pub struct MoveToLocation {
    players: Arc<dyn PlayerRepo>,
    locations: Arc<dyn LocationRepo>,
}

impl MoveToLocation {
    pub fn new(players: Arc<dyn PlayerRepo>, locations: Arc<dyn LocationRepo>) -> Self {
        Self { players, locations }
    }

    pub async fn execute(
        &self,
        player_id: PlayerId,
        target_slug: &str,
    ) -> Result<Location, TravelError> {
        // 1. Load the player
        let player = self
            .players
            .get(player_id)
            .await?
            .ok_or(TravelError::PlayerNotFound)?;

        // 2. Resolve the destination
        let target = self
            .locations
            .find_by_slug(target_slug)
            .await?
            .ok_or_else(|| TravelError::LocationNotFound(target_slug.to_owned()))?;

        // 3. Check adjacency; a player without a location can be placed
        //    anywhere
        if let Some(current) = player.location_id {
            if current == target.id {
                return Err(TravelError::SameLocation);
            }
            if !self.locations.are_linked(current, target.id).await? {
                return Err(TravelError::LocationsNotConnected);
            }
        }

        // 4. Update the player's position
        self.players.update_location(player.id, target.id).await?;

        tracing::info!(
            player_id = %player.id,
            location = %target.slug,
            "player moved to location"
        );

        Ok(target)
    }
}
