//! Player records.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use mirefell_domain::{CombatStats, EquipSlot, EquipmentSlots, LocationId, Player, PlayerId};

use crate::infrastructure::ports::{ClockPort, PlayerRepo, RepoError};

use super::{parse_id, parse_opt_id};

pub(crate) const PLAYER_COLUMNS: &str = "id, username, level, experience, free_stat_points, \
     gold, base_attack, base_defense, base_hp, attack, defense, hp, current_hp, location_id, \
     chest_item_id, belt_item_id, head_item_id, neck_item_id, weapon_item_id, shield_item_id, \
     legs_item_id, feet_item_id, arms_item_id, hands_item_id, \
     ring1_item_id, ring2_item_id, ring3_item_id, ring4_item_id";

/// Column holding the given equipment slot on the players table.
pub(crate) fn slot_column(slot: EquipSlot) -> &'static str {
    match slot {
        EquipSlot::Chest => "chest_item_id",
        EquipSlot::Belt => "belt_item_id",
        EquipSlot::Head => "head_item_id",
        EquipSlot::Neck => "neck_item_id",
        EquipSlot::Weapon => "weapon_item_id",
        EquipSlot::Shield => "shield_item_id",
        EquipSlot::Legs => "legs_item_id",
        EquipSlot::Feet => "feet_item_id",
        EquipSlot::Arms => "arms_item_id",
        EquipSlot::Hands => "hands_item_id",
        EquipSlot::Ring1 => "ring1_item_id",
        EquipSlot::Ring2 => "ring2_item_id",
        EquipSlot::Ring3 => "ring3_item_id",
        EquipSlot::Ring4 => "ring4_item_id",
    }
}

pub(crate) fn player_from_row(row: &SqliteRow) -> Result<Player, RepoError> {
    let mut slots = EquipmentSlots::empty();
    for slot in EquipSlot::ALL {
        let value: Option<String> = row.get(slot_column(slot));
        slots.set(slot, parse_opt_id(value)?);
    }

    Ok(Player {
        id: parse_id(row.get::<&str, _>("id"))?,
        username: row.get("username"),
        level: row.get("level"),
        experience: row.get("experience"),
        free_stat_points: row.get("free_stat_points"),
        gold: row.get("gold"),
        base_stats: CombatStats {
            attack: row.get("base_attack"),
            defense: row.get("base_defense"),
            hp: row.get("base_hp"),
        },
        stats: CombatStats {
            attack: row.get("attack"),
            defense: row.get("defense"),
            hp: row.get("hp"),
        },
        current_hp: row.get("current_hp"),
        location_id: parse_opt_id(row.get::<Option<String>, _>("location_id"))?,
        slots,
    })
}

pub struct SqlitePlayerRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqlitePlayerRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl PlayerRepo for SqlitePlayerRepo {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("player_get", e))?;

        row.as_ref().map(player_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("player_find_by_username", e))?;

        row.as_ref().map(player_from_row).transpose()
    }

    async fn create(&self, player: &Player) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO players (
                id, username, level, experience, free_stat_points, gold,
                base_attack, base_defense, base_hp, attack, defense, hp,
                current_hp, location_id, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(player.id.to_string())
        .bind(&player.username)
        .bind(player.level)
        .bind(player.experience)
        .bind(player.free_stat_points)
        .bind(player.gold)
        .bind(player.base_stats.attack)
        .bind(player.base_stats.defense)
        .bind(player.base_stats.hp)
        .bind(player.stats.attack)
        .bind(player.stats.defense)
        .bind(player.stats.hp)
        .bind(player.current_hp)
        .bind(player.location_id.map(|id| id.to_string()))
        .bind(self.clock.now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("player_create", e))?;

        Ok(())
    }

    async fn update_location(
        &self,
        id: PlayerId,
        location_id: LocationId,
    ) -> Result<(), RepoError> {
        sqlx::query("UPDATE players SET location_id = ? WHERE id = ?")
            .bind(location_id.to_string())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("player_update_location", e))?;

        Ok(())
    }

    async fn regenerate_health(&self, percent: i64) -> Result<u64, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE players
            SET current_hp = MIN(hp, current_hp + MAX(1, CAST(hp * ? / 100.0 AS INTEGER)))
            WHERE current_hp < hp
            "#,
        )
        .bind(percent)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("player_regenerate_health", e))?;

        Ok(result.rows_affected())
    }
}
