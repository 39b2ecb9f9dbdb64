//! Transactional store over the shared pool.
//!
//! `SqliteStoreTx` wraps one sqlx transaction. Dropping it without commit
//! rolls back, which is what every economy use case relies on when a check
//! fails mid-operation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use mirefell_domain::{
    CategoryId, CombatStats, EquipSlot, EquipmentCategory, EquipmentItem, Fight, ItemId, Player,
    PlayerId, Round,
};

use crate::infrastructure::ports::{ClockPort, RepoError, StorePort, StoreTx};

use super::items::{category_from_row, item_from_row, ITEM_COLUMNS};
use super::players::{player_from_row, slot_column, PLAYER_COLUMNS};

pub struct SqliteStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl StorePort for SqliteStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, RepoError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("begin", e))?;

        Ok(Box::new(SqliteStoreTx {
            tx: Some(tx),
            now: self.clock.now(),
        }))
    }
}

pub struct SqliteStoreTx {
    /// `None` once committed; a drop with `Some` rolls the transaction back.
    tx: Option<Transaction<'static, Sqlite>>,
    now: DateTime<Utc>,
}

impl SqliteStoreTx {
    fn tx(&mut self) -> Result<&mut Transaction<'static, Sqlite>, RepoError> {
        self.tx
            .as_mut()
            .ok_or_else(|| RepoError::database("store_tx", "transaction already committed"))
    }
}

#[async_trait]
impl StoreTx for SqliteStoreTx {
    async fn player_by_id(&mut self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        let tx = self.tx()?;
        let row = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| RepoError::database("tx_player_by_id", e))?;

        row.as_ref().map(player_from_row).transpose()
    }

    async fn item_by_id(&mut self, id: ItemId) -> Result<Option<EquipmentItem>, RepoError> {
        let tx = self.tx()?;
        let row = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM equipment_items WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| RepoError::database("tx_item_by_id", e))?;

        row.as_ref().map(item_from_row).transpose()
    }

    async fn item_by_slug(&mut self, slug: &str) -> Result<Option<EquipmentItem>, RepoError> {
        let tx = self.tx()?;
        let row = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM equipment_items WHERE slug = ?"
        ))
        .bind(slug)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| RepoError::database("tx_item_by_slug", e))?;

        row.as_ref().map(item_from_row).transpose()
    }

    async fn items_by_ids(&mut self, ids: &[ItemId]) -> Result<Vec<EquipmentItem>, RepoError> {
        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(item) = self.item_by_id(*id).await? {
                items.push(item);
            }
        }
        Ok(items)
    }

    async fn category_by_id(
        &mut self,
        id: CategoryId,
    ) -> Result<Option<EquipmentCategory>, RepoError> {
        let tx = self.tx()?;
        let row = sqlx::query("SELECT id, name, kind FROM equipment_categories WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| RepoError::database("tx_category_by_id", e))?;

        row.as_ref().map(category_from_row).transpose()
    }

    async fn owns_item(
        &mut self,
        player_id: PlayerId,
        item_id: ItemId,
    ) -> Result<bool, RepoError> {
        let tx = self.tx()?;
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM inventory_entries WHERE player_id = ? AND item_id = ?",
        )
        .bind(player_id.to_string())
        .bind(item_id.to_string())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| RepoError::database("tx_owns_item", e))?;

        Ok(count > 0)
    }

    async fn insert_inventory_entry(
        &mut self,
        player_id: PlayerId,
        item_id: ItemId,
    ) -> Result<(), RepoError> {
        let now = self.now.to_rfc3339();
        let tx = self.tx()?;
        sqlx::query(
            r#"
            INSERT INTO inventory_entries (id, player_id, item_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(player_id.to_string())
        .bind(item_id.to_string())
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(|e| RepoError::database("tx_insert_inventory_entry", e))?;

        Ok(())
    }

    async fn remove_inventory_entry(
        &mut self,
        player_id: PlayerId,
        item_id: ItemId,
    ) -> Result<(), RepoError> {
        let tx = self.tx()?;
        sqlx::query(
            r#"
            DELETE FROM inventory_entries
            WHERE rowid IN (
                SELECT rowid FROM inventory_entries
                WHERE player_id = ? AND item_id = ?
                LIMIT 1
            )
            "#,
        )
        .bind(player_id.to_string())
        .bind(item_id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(|e| RepoError::database("tx_remove_inventory_entry", e))?;

        Ok(())
    }

    async fn set_equipment_slot(
        &mut self,
        player_id: PlayerId,
        slot: EquipSlot,
        item: Option<ItemId>,
    ) -> Result<(), RepoError> {
        let tx = self.tx()?;
        // Column name comes from an exhaustive match, never from input.
        let sql = format!("UPDATE players SET {} = ? WHERE id = ?", slot_column(slot));
        sqlx::query(&sql)
            .bind(item.map(|id| id.to_string()))
            .bind(player_id.to_string())
            .execute(&mut **tx)
            .await
            .map_err(|e| RepoError::database("tx_set_equipment_slot", e))?;

        Ok(())
    }

    async fn set_gold(&mut self, player_id: PlayerId, gold: i64) -> Result<(), RepoError> {
        let tx = self.tx()?;
        sqlx::query("UPDATE players SET gold = ? WHERE id = ?")
            .bind(gold)
            .bind(player_id.to_string())
            .execute(&mut **tx)
            .await
            .map_err(|e| RepoError::database("tx_set_gold", e))?;

        Ok(())
    }

    async fn set_combat_stats(
        &mut self,
        player_id: PlayerId,
        stats: CombatStats,
    ) -> Result<(), RepoError> {
        let tx = self.tx()?;
        sqlx::query("UPDATE players SET attack = ?, defense = ?, hp = ? WHERE id = ?")
            .bind(stats.attack)
            .bind(stats.defense)
            .bind(stats.hp)
            .bind(player_id.to_string())
            .execute(&mut **tx)
            .await
            .map_err(|e| RepoError::database("tx_set_combat_stats", e))?;

        Ok(())
    }

    async fn insert_fight(&mut self, fight: &Fight) -> Result<(), RepoError> {
        let tx = self.tx()?;
        sqlx::query(
            r#"
            INSERT INTO fights (id, player_id, bot_id, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(fight.id.to_string())
        .bind(fight.player_id.to_string())
        .bind(fight.bot_id.to_string())
        .bind(fight.status.as_str())
        .bind(fight.created_at.to_rfc3339())
        .execute(&mut **tx)
        .await
        .map_err(|e| RepoError::database("tx_insert_fight", e))?;

        Ok(())
    }

    async fn insert_round(&mut self, round: &Round) -> Result<(), RepoError> {
        let tx = self.tx()?;
        sqlx::query(
            r#"
            INSERT INTO rounds (
                id, fight_id, player_hp, bot_hp, player_damage, bot_damage,
                player_attack_point, player_defense_point,
                bot_attack_point, bot_defense_point, status, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(round.id.to_string())
        .bind(round.fight_id.to_string())
        .bind(round.player_hp)
        .bind(round.bot_hp)
        .bind(round.player_damage)
        .bind(round.bot_damage)
        .bind(round.player_attack_point.map(|p| p.as_str()))
        .bind(round.player_defense_point.map(|p| p.as_str()))
        .bind(round.bot_attack_point.map(|p| p.as_str()))
        .bind(round.bot_defense_point.map(|p| p.as_str()))
        .bind(round.status.as_str())
        .bind(round.created_at.to_rfc3339())
        .execute(&mut **tx)
        .await
        .map_err(|e| RepoError::database("tx_insert_round", e))?;

        Ok(())
    }

    async fn commit(&mut self) -> Result<(), RepoError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| RepoError::database("commit", "transaction already committed"))?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("commit", e))
    }
}
