//! Looking up the fight a player is in.

use std::sync::Arc;

use mirefell_domain::entities::{Bot, Fight, Player};
use mirefell_domain::PlayerId;

use crate::infrastructure::ports::{BotRepo, FightRepo, PlayerRepo, RepoError};
use crate::use_cases::fight::FightError;

/// Both sides of a fight in progress.
pub struct CurrentFight {
    pub fight: Fight,
    pub player: Player,
    pub bot: Bot,
}

/// Fetches the player's open fight together with both combatants.
pub struct GetCurrentFight {
    players: Arc<dyn PlayerRepo>,
    fights: Arc<dyn FightRepo>,
    bots: Arc<dyn BotRepo>,
}

impl GetCurrentFight {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        fights: Arc<dyn FightRepo>,
        bots: Arc<dyn BotRepo>,
    ) -> Self {
        Self {
            players,
            fights,
            bots,
        }
    }

    pub async fn execute(&self, player_id: PlayerId) -> Result<CurrentFight, FightError> {
        let player = self
            .players
            .get(player_id)
            .await?
            .ok_or(FightError::PlayerNotFound)?;

        let fight = self
            .fights
            .find_active_by_player(player.id)
            .await?
            .ok_or(FightError::NoActiveFight)?;

        let bot = self
            .bots
            .get(fight.bot_id)
            .await?
            .ok_or_else(|| RepoError::not_found("bot", fight.bot_id))?;

        Ok(CurrentFight { fight, player, bot })
    }
}
