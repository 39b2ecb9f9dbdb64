//! SQLite-backed persistence.
//!
//! One pool serves every repository plus the transactional store. Ids are
//! stored as uuid text, timestamps as RFC 3339 text so `ORDER BY created_at`
//! sorts chronologically.

mod bots;
mod fights;
mod items;
mod locations;
mod movements;
mod players;
mod schema;
mod seed;
mod store;

#[cfg(test)]
mod integration_tests;

pub use bots::SqliteBotRepo;
pub use fights::SqliteFightRepo;
pub use items::SqliteItemRepo;
pub use locations::SqliteLocationRepo;
pub use movements::SqliteMovementRepo;
pub use players::SqlitePlayerRepo;
pub use schema::ensure_schema;
pub use seed::seed_if_empty;
pub use store::SqliteStore;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::infrastructure::ports::RepoError;

/// Open (creating if missing) the database at `db_path`.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| RepoError::database("connect", e))
}

pub(crate) fn parse_id<T: From<Uuid>>(value: &str) -> Result<T, RepoError> {
    Uuid::parse_str(value)
        .map(T::from)
        .map_err(|e| RepoError::serialization(format!("invalid uuid {value}: {e}")))
}

pub(crate) fn parse_opt_id<T: From<Uuid>>(value: Option<String>) -> Result<Option<T>, RepoError> {
    value.as_deref().map(parse_id).transpose()
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("invalid timestamp {value}: {e}")))
}
