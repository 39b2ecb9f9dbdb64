//! Bot catalog.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use mirefell_domain::{Bot, BotId, LocationId};

use crate::infrastructure::ports::{BotRepo, RepoError};

use super::parse_id;

const BOT_COLUMNS: &str = "id, name, slug, level, attack, defense, hp";

fn bot_from_row(row: &SqliteRow) -> Result<Bot, RepoError> {
    Ok(Bot {
        id: parse_id(row.get::<&str, _>("id"))?,
        name: row.get("name"),
        slug: row.get("slug"),
        level: row.get("level"),
        attack: row.get("attack"),
        defense: row.get("defense"),
        hp: row.get("hp"),
    })
}

pub struct SqliteBotRepo {
    pool: SqlitePool,
}

impl SqliteBotRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BotRepo for SqliteBotRepo {
    async fn get(&self, id: BotId) -> Result<Option<Bot>, RepoError> {
        let row = sqlx::query(&format!("SELECT {BOT_COLUMNS} FROM bots WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("bot_get", e))?;

        row.as_ref().map(bot_from_row).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Bot>, RepoError> {
        let row = sqlx::query(&format!("SELECT {BOT_COLUMNS} FROM bots WHERE slug = ?"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("bot_find_by_slug", e))?;

        row.as_ref().map(bot_from_row).transpose()
    }

    async fn list_at_location(&self, location_id: LocationId) -> Result<Vec<Bot>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.name, b.slug, b.level, b.attack, b.defense, b.hp
            FROM bots b
            JOIN location_bots lb ON lb.bot_id = b.id
            WHERE lb.location_id = ?
            ORDER BY b.name
            "#,
        )
        .bind(location_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("bot_list_at_location", e))?;

        rows.iter().map(bot_from_row).collect()
    }

    async fn create(&self, bot: &Bot) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO bots (id, name, slug, level, attack, defense, hp)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(bot.id.to_string())
        .bind(&bot.name)
        .bind(&bot.slug)
        .bind(bot.level)
        .bind(bot.attack)
        .bind(bot.defense)
        .bind(bot.hp)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("bot_create", e))?;

        Ok(())
    }
}
