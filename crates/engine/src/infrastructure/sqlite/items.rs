//! Equipment catalog and inventory reads.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use mirefell_domain::{EquipmentCategory, EquipmentItem, ItemId, PlayerId, SlotKind};

use crate::infrastructure::ports::{ItemRepo, RepoError};

use super::parse_id;

pub(crate) const ITEM_COLUMNS: &str =
    "id, name, slug, attack, defense, hp, required_level, price, artifact, category_id";

pub(crate) fn item_from_row(row: &SqliteRow) -> Result<EquipmentItem, RepoError> {
    Ok(EquipmentItem {
        id: parse_id(row.get::<&str, _>("id"))?,
        name: row.get("name"),
        slug: row.get("slug"),
        attack: row.get("attack"),
        defense: row.get("defense"),
        hp: row.get("hp"),
        required_level: row.get("required_level"),
        price: row.get("price"),
        artifact: row.get("artifact"),
        category_id: parse_id(row.get::<&str, _>("category_id"))?,
    })
}

pub(crate) fn category_from_row(row: &SqliteRow) -> Result<EquipmentCategory, RepoError> {
    let kind: &str = row.get("kind");
    Ok(EquipmentCategory {
        id: parse_id(row.get::<&str, _>("id"))?,
        name: row.get("name"),
        kind: SlotKind::from_str(kind).map_err(RepoError::serialization)?,
    })
}

pub struct SqliteItemRepo {
    pool: SqlitePool,
}

impl SqliteItemRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepo for SqliteItemRepo {
    async fn get(&self, id: ItemId) -> Result<Option<EquipmentItem>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM equipment_items WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("item_get", e))?;

        row.as_ref().map(item_from_row).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<EquipmentItem>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM equipment_items WHERE slug = ?"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("item_find_by_slug", e))?;

        row.as_ref().map(item_from_row).transpose()
    }

    async fn create(&self, item: &EquipmentItem) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO equipment_items (
                id, name, slug, attack, defense, hp, required_level, price, artifact, category_id
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.id.to_string())
        .bind(&item.name)
        .bind(&item.slug)
        .bind(item.attack)
        .bind(item.defense)
        .bind(item.hp)
        .bind(item.required_level)
        .bind(item.price)
        .bind(item.artifact)
        .bind(item.category_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("item_create", e))?;

        Ok(())
    }

    async fn create_category(&self, category: &EquipmentCategory) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO equipment_categories (id, name, kind) VALUES (?, ?, ?)")
            .bind(category.id.to_string())
            .bind(&category.name)
            .bind(category.kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("category_create", e))?;

        Ok(())
    }

    async fn list_inventory(&self, player_id: PlayerId) -> Result<Vec<EquipmentItem>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.name, i.slug, i.attack, i.defense, i.hp,
                   i.required_level, i.price, i.artifact, i.category_id
            FROM equipment_items i
            JOIN inventory_entries e ON e.item_id = i.id
            WHERE e.player_id = ?
            ORDER BY e.created_at
            "#,
        )
        .bind(player_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("inventory_list", e))?;

        rows.iter().map(item_from_row).collect()
    }
}
