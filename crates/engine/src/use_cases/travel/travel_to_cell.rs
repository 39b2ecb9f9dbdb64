//! Timed traversal across world cells.

use std::sync::Arc;

use mirefell_domain::{MovementId, PlayerId};

use crate::infrastructure::ports::PlayerRepo;
use crate::use_cases::movement::MovementSessions;
use crate::use_cases::travel::{LocationGraph, TravelError};

/// Starts a timed walk from the player's current cell to a target cell.
///
/// The route is planned up front on the in-memory map and then handed to
/// the movement session manager, which steps the player one cell per tick
/// in the background. Returns `None` when the player already stands on
/// the target cell.
pub struct TravelToCell {
    players: Arc<dyn PlayerRepo>,
    graph: Arc<LocationGraph>,
    sessions: Arc<MovementSessions>,
}

impl TravelToCell {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        graph: Arc<LocationGraph>,
        sessions: Arc<MovementSessions>,
    ) -> Self {
        Self {
            players,
            graph,
            sessions,
        }
    }

    pub async fn execute(
        &self,
        player_id: PlayerId,
        target_slug: &str,
    ) -> Result<Option<MovementId>, TravelError> {
        // 1. Load the player and find where they stand
        let player = self
            .players
            .get(player_id)
            .await?
            .ok_or(TravelError::PlayerNotFound)?;
        let current_id = player.location_id.ok_or(TravelError::PlayerNotPlaced)?;
        let current_slug = self
            .graph
            .slug_of(current_id)
            .ok_or_else(|| TravelError::LocationNotFound(current_id.to_string()))?;

        // 2. Nothing to do when the player is already there
        if current_slug == target_slug {
            return Ok(None);
        }

        // 3. Plan the route and start walking it
        let route = self.graph.find_shortest_path(&current_slug, target_slug)?;
        let hops = route.len();
        let movement_id = self.sessions.start(player_id, route).await?;

        tracing::info!(
            player_id = %player_id,
            from = %current_slug,
            to = %target_slug,
            hops,
            "movement session started"
        );

        Ok(Some(movement_id))
    }
}
