//! Fetching a player by id or username.

use std::sync::Arc;

use mirefell_domain::entities::Player;
use mirefell_domain::PlayerId;

use crate::infrastructure::ports::PlayerRepo;
use crate::use_cases::players::PlayerError;

pub struct GetPlayer {
    players: Arc<dyn PlayerRepo>,
}

impl GetPlayer {
    pub fn new(players: Arc<dyn PlayerRepo>) -> Self {
        Self { players }
    }

    pub async fn execute(&self, player_id: PlayerId) -> Result<Player, PlayerError> {
        self.players
            .get(player_id)
            .await?
            .ok_or(PlayerError::PlayerNotFound)
    }

    pub async fn by_username(&self, username: &str) -> Result<Player, PlayerError> {
        self.players
            .find_by_username(username)
            .await?
            .ok_or(PlayerError::PlayerNotFound)
    }
}
