//! Idempotent schema setup, executed at startup.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS players (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        level INTEGER NOT NULL DEFAULT 1,
        experience INTEGER NOT NULL DEFAULT 0,
        free_stat_points INTEGER NOT NULL DEFAULT 10,
        gold INTEGER NOT NULL DEFAULT 0,
        base_attack INTEGER NOT NULL DEFAULT 1,
        base_defense INTEGER NOT NULL DEFAULT 1,
        base_hp INTEGER NOT NULL DEFAULT 20,
        attack INTEGER NOT NULL DEFAULT 1,
        defense INTEGER NOT NULL DEFAULT 1,
        hp INTEGER NOT NULL DEFAULT 20,
        current_hp INTEGER NOT NULL DEFAULT 20,
        location_id TEXT REFERENCES locations(id),
        chest_item_id TEXT,
        belt_item_id TEXT,
        head_item_id TEXT,
        neck_item_id TEXT,
        weapon_item_id TEXT,
        shield_item_id TEXT,
        legs_item_id TEXT,
        feet_item_id TEXT,
        arms_item_id TEXT,
        hands_item_id TEXT,
        ring1_item_id TEXT,
        ring2_item_id TEXT,
        ring3_item_id TEXT,
        ring4_item_id TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment_categories (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        kind TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment_items (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        attack INTEGER NOT NULL DEFAULT 0,
        defense INTEGER NOT NULL DEFAULT 0,
        hp INTEGER NOT NULL DEFAULT 0,
        required_level INTEGER NOT NULL DEFAULT 1,
        price INTEGER NOT NULL DEFAULT 0,
        artifact INTEGER NOT NULL DEFAULT 0,
        category_id TEXT NOT NULL REFERENCES equipment_categories(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS inventory_entries (
        id TEXT PRIMARY KEY,
        player_id TEXT NOT NULL REFERENCES players(id),
        item_id TEXT NOT NULL REFERENCES equipment_items(id),
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS locations (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        is_cell INTEGER NOT NULL DEFAULT 0,
        inactive INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS location_connections (
        from_location_id TEXT NOT NULL REFERENCES locations(id),
        to_location_id TEXT NOT NULL REFERENCES locations(id),
        PRIMARY KEY (from_location_id, to_location_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bots (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        level INTEGER NOT NULL DEFAULT 1,
        attack INTEGER NOT NULL DEFAULT 1,
        defense INTEGER NOT NULL DEFAULT 1,
        hp INTEGER NOT NULL DEFAULT 10
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS location_bots (
        location_id TEXT NOT NULL REFERENCES locations(id),
        bot_id TEXT NOT NULL REFERENCES bots(id),
        PRIMARY KEY (location_id, bot_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS fights (
        id TEXT PRIMARY KEY,
        player_id TEXT NOT NULL REFERENCES players(id),
        bot_id TEXT NOT NULL REFERENCES bots(id),
        status TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS rounds (
        id TEXT PRIMARY KEY,
        fight_id TEXT NOT NULL REFERENCES fights(id),
        player_hp INTEGER NOT NULL,
        bot_hp INTEGER NOT NULL,
        player_damage INTEGER NOT NULL DEFAULT 0,
        bot_damage INTEGER NOT NULL DEFAULT 0,
        player_attack_point TEXT,
        player_defense_point TEXT,
        bot_attack_point TEXT,
        bot_defense_point TEXT,
        status TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS movements (
        id TEXT PRIMARY KEY,
        player_id TEXT NOT NULL REFERENCES players(id),
        status TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS movement_steps (
        movement_id TEXT NOT NULL REFERENCES movements(id),
        from_location_id TEXT NOT NULL,
        to_location_id TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_inventory_player_item
        ON inventory_entries (player_id, item_id)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_fights_player_status
        ON fights (player_id, status)
    "#,
];

/// Create every table and index this engine relies on.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for ddl in TABLES {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }
    Ok(())
}
