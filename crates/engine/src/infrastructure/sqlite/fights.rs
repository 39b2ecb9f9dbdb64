//! Fight record reads. Writes go through the transactional store.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use mirefell_domain::{Fight, FightStatus, PlayerId};

use crate::infrastructure::ports::{FightRepo, RepoError};

use super::{parse_id, parse_timestamp};

pub struct SqliteFightRepo {
    pool: SqlitePool,
}

impl SqliteFightRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FightRepo for SqliteFightRepo {
    async fn find_active_by_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Option<Fight>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT id, player_id, bot_id, status, created_at
            FROM fights
            WHERE player_id = ? AND status = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(player_id.to_string())
        .bind(FightStatus::InProgress.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("fight_find_active", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Fight {
            id: parse_id(row.get::<&str, _>("id"))?,
            player_id: parse_id(row.get::<&str, _>("player_id"))?,
            bot_id: parse_id(row.get::<&str, _>("bot_id"))?,
            status: FightStatus::from_str(row.get("status"))
                .map_err(RepoError::serialization)?,
            created_at: parse_timestamp(row.get("created_at"))?,
        }))
    }
}
