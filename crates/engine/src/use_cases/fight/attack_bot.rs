//! Starting a fight against a bot.

use std::sync::Arc;

use mirefell_domain::entities::{Bot, Fight, Round};
use mirefell_domain::PlayerId;

use crate::infrastructure::ports::{
    BotRepo, ClockPort, FightRepo, LocationRepo, PlayerRepo, RepoError, StorePort,
};
use crate::use_cases::fight::FightError;

/// The fight an attack resolved to, with the bot actually being fought.
pub struct AttackOutcome {
    pub fight: Fight,
    pub bot: Bot,
}

/// Opens a fight against a bot standing at the player's location.
///
/// A player holds at most one fight in progress. Attacking while one is
/// open rejoins it and returns the bot it was started against, which need
/// not be the bot named in the request.
pub struct AttackBot {
    players: Arc<dyn PlayerRepo>,
    bots: Arc<dyn BotRepo>,
    locations: Arc<dyn LocationRepo>,
    fights: Arc<dyn FightRepo>,
    store: Arc<dyn StorePort>,
    clock: Arc<dyn ClockPort>,
}

impl AttackBot {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        bots: Arc<dyn BotRepo>,
        locations: Arc<dyn LocationRepo>,
        fights: Arc<dyn FightRepo>,
        store: Arc<dyn StorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            players,
            bots,
            locations,
            fights,
            store,
            clock,
        }
    }

    pub async fn execute(
        &self,
        player_id: PlayerId,
        bot_slug: &str,
    ) -> Result<AttackOutcome, FightError> {
        // 1. Resolve the target
        let bot = self
            .bots
            .find_by_slug(bot_slug)
            .await?
            .ok_or_else(|| FightError::BotNotFound(bot_slug.to_owned()))?;

        // 2. Load the attacker; the bot must stand where they do
        let player = self
            .players
            .get(player_id)
            .await?
            .ok_or(FightError::PlayerNotFound)?;
        let location_id = player.location_id.ok_or(FightError::BotNotPresent)?;
        if !self.locations.has_bot(location_id, bot.id).await? {
            return Err(FightError::BotNotPresent);
        }

        // 3. An open fight wins over the new request
        if let Some(fight) = self.fights.find_active_by_player(player_id).await? {
            let opponent = self
                .bots
                .get(fight.bot_id)
                .await?
                .ok_or_else(|| RepoError::not_found("bot", fight.bot_id))?;
            tracing::debug!(
                player_id = %player_id,
                fight_id = %fight.id,
                "rejoining fight in progress"
            );
            return Ok(AttackOutcome {
                fight,
                bot: opponent,
            });
        }

        // 4. Open the fight together with its first round
        let now = self.clock.now();
        let fight = Fight::new(player_id, bot.id, now);
        let round = Round::opening(fight.id, player.current_hp, bot.hp, now);

        let mut tx = self.store.begin().await?;
        tx.insert_fight(&fight).await?;
        tx.insert_round(&round).await?;
        tx.commit().await?;

        tracing::info!(
            player_id = %player_id,
            bot = %bot.slug,
            fight_id = %fight.id,
            "fight started"
        );

        Ok(AttackOutcome { fight, bot })
    }
}
