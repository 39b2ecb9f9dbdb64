//! Movement session records.
//!
//! A session is the persistent trace of one timed traversal across cells.
//! The in-memory timer driving it lives in the engine; this entity only
//! models the stored lifecycle and the per-tick transition records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{LocationId, MovementId, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementStatus {
    Active,
    Finished,
}

impl MovementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for MovementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MovementStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            other => Err(DomainError::parse(format!(
                "unknown movement status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementSession {
    pub id: MovementId,
    pub player_id: PlayerId,
    pub status: MovementStatus,
    pub created_at: DateTime<Utc>,
}

impl MovementSession {
    pub fn new(player_id: PlayerId, now: DateTime<Utc>) -> Self {
        Self {
            id: MovementId::new(),
            player_id,
            status: MovementStatus::Active,
            created_at: now,
        }
    }
}

/// One cell-to-cell transition performed by a session tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementStep {
    pub movement_id: MovementId,
    pub from_location_id: LocationId,
    pub to_location_id: LocationId,
    pub created_at: DateTime<Utc>,
}
