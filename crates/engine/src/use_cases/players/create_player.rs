//! Creating a new player character.

use std::sync::Arc;

use mirefell_domain::entities::Player;

use crate::infrastructure::ports::{LocationRepo, PlayerRepo};
use crate::use_cases::players::PlayerError;

/// Registers a fresh character and drops them at the starting location.
pub struct CreatePlayer {
    players: Arc<dyn PlayerRepo>,
    locations: Arc<dyn LocationRepo>,
}

impl CreatePlayer {
    pub fn new(players: Arc<dyn PlayerRepo>, locations: Arc<dyn LocationRepo>) -> Self {
        Self { players, locations }
    }

    pub async fn execute(&self, username: &str, start_slug: &str) -> Result<Player, PlayerError> {
        // 1. Usernames are unique
        if self.players.find_by_username(username).await?.is_some() {
            return Err(PlayerError::UsernameTaken(username.to_owned()));
        }

        // 2. Resolve the starting location
        let start = self
            .locations
            .find_by_slug(start_slug)
            .await?
            .ok_or_else(|| PlayerError::LocationNotFound(start_slug.to_owned()))?;

        // 3. Create the character there
        let mut player = Player::new(username);
        player.location_id = Some(start.id);
        self.players.create(&player).await?;

        tracing::info!(
            player_id = %player.id,
            username = %player.username,
            location = %start.slug,
            "player created"
        );

        Ok(player)
    }
}
