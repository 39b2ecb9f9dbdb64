//! Locations, their connections, and bot placements.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use mirefell_domain::{BotId, Location, LocationId, LocationLink};

use crate::infrastructure::ports::{LocationRepo, RepoError};

use super::parse_id;

const LOCATION_COLUMNS: &str = "id, name, slug, is_cell, inactive";

fn location_from_row(row: &SqliteRow) -> Result<Location, RepoError> {
    Ok(Location {
        id: parse_id(row.get::<&str, _>("id"))?,
        name: row.get("name"),
        slug: row.get("slug"),
        is_cell: row.get("is_cell"),
        inactive: row.get("inactive"),
    })
}

pub struct SqliteLocationRepo {
    pool: SqlitePool,
}

impl SqliteLocationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepo for SqliteLocationRepo {
    async fn get(&self, id: LocationId) -> Result<Option<Location>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("location_get", e))?;

        row.as_ref().map(location_from_row).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE slug = ?"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("location_find_by_slug", e))?;

        row.as_ref().map(location_from_row).transpose()
    }

    async fn list_active(&self) -> Result<Vec<Location>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE inactive = 0"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("location_list_active", e))?;

        rows.iter().map(location_from_row).collect()
    }

    async fn list_links(&self) -> Result<Vec<LocationLink>, RepoError> {
        let rows =
            sqlx::query("SELECT from_location_id, to_location_id FROM location_connections")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::database("location_list_links", e))?;

        rows.iter()
            .map(|row| {
                Ok(LocationLink {
                    from: parse_id(row.get::<&str, _>("from_location_id"))?,
                    to: parse_id(row.get::<&str, _>("to_location_id"))?,
                })
            })
            .collect()
    }

    async fn are_linked(&self, a: LocationId, b: LocationId) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM location_connections
            WHERE (from_location_id = ? AND to_location_id = ?)
               OR (from_location_id = ? AND to_location_id = ?)
            "#,
        )
        .bind(a.to_string())
        .bind(b.to_string())
        .bind(b.to_string())
        .bind(a.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::database("location_are_linked", e))?;

        Ok(count > 0)
    }

    async fn create(&self, location: &Location) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO locations (id, name, slug, is_cell, inactive) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(location.id.to_string())
        .bind(&location.name)
        .bind(&location.slug)
        .bind(location.is_cell)
        .bind(location.inactive)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("location_create", e))?;

        Ok(())
    }

    async fn link(&self, from: LocationId, to: LocationId) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO location_connections (from_location_id, to_location_id)
            VALUES (?, ?)
            "#,
        )
        .bind(from.to_string())
        .bind(to.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("location_link", e))?;

        Ok(())
    }

    async fn has_bot(&self, location_id: LocationId, bot_id: BotId) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM location_bots WHERE location_id = ? AND bot_id = ?",
        )
        .bind(location_id.to_string())
        .bind(bot_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::database("location_has_bot", e))?;

        Ok(count > 0)
    }

    async fn place_bot(&self, location_id: LocationId, bot_id: BotId) -> Result<(), RepoError> {
        sqlx::query("INSERT OR IGNORE INTO location_bots (location_id, bot_id) VALUES (?, ?)")
            .bind(location_id.to_string())
            .bind(bot_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("location_place_bot", e))?;

        Ok(())
    }
}
