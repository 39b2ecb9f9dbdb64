//! Movement sessions and their step records.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use mirefell_domain::{MovementId, MovementSession, MovementStatus, MovementStep, PlayerId};

use crate::infrastructure::ports::{MovementRepo, RepoError};

use super::{parse_id, parse_timestamp};

pub struct SqliteMovementRepo {
    pool: SqlitePool,
}

impl SqliteMovementRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovementRepo for SqliteMovementRepo {
    async fn create_session(&self, session: &MovementSession) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO movements (id, player_id, status, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(session.id.to_string())
        .bind(session.player_id.to_string())
        .bind(session.status.as_str())
        .bind(session.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("movement_create", e))?;

        Ok(())
    }

    async fn finish_session(&self, id: MovementId) -> Result<(), RepoError> {
        sqlx::query("UPDATE movements SET status = ? WHERE id = ?")
            .bind(MovementStatus::Finished.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("movement_finish", e))?;

        Ok(())
    }

    async fn get_session(&self, id: MovementId) -> Result<Option<MovementSession>, RepoError> {
        let row = sqlx::query(
            "SELECT id, player_id, status, created_at FROM movements WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("movement_get", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(MovementSession {
            id: parse_id(row.get::<&str, _>("id"))?,
            player_id: parse_id(row.get::<&str, _>("player_id"))?,
            status: MovementStatus::from_str(row.get("status"))
                .map_err(RepoError::serialization)?,
            created_at: parse_timestamp(row.get("created_at"))?,
        }))
    }

    async fn record_step(
        &self,
        step: &MovementStep,
        player_id: PlayerId,
    ) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("movement_step", e))?;

        sqlx::query(
            r#"
            INSERT INTO movement_steps (movement_id, from_location_id, to_location_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(step.movement_id.to_string())
        .bind(step.from_location_id.to_string())
        .bind(step.to_location_id.to_string())
        .bind(step.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("movement_step", e))?;

        sqlx::query("UPDATE players SET location_id = ? WHERE id = ?")
            .bind(step.to_location_id.to_string())
            .bind(player_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("movement_step", e))?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("movement_step", e))?;

        Ok(())
    }
}
