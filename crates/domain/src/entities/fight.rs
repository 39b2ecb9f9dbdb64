//! Fight and round records.
//!
//! A fight pairs one player with one bot. Rounds snapshot both combatants'
//! remaining hit points per exchange; the opening round carries zero damage
//! and no declared body parts. Turn resolution itself lives outside this
//! crate, so fights stay in progress until a combat module finishes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{BotId, FightId, PlayerId, RoundId};

/// Lifecycle shared by fights and their rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightStatus {
    InProgress,
    Finished,
}

impl FightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for FightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FightStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "finished" => Ok(Self::Finished),
            other => Err(DomainError::parse(format!("unknown fight status: {other}"))),
        }
    }
}

/// A body location a combatant can strike at or guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BodyPart {
    Head,
    Neck,
    Chest,
    Belt,
    Legs,
    Hands,
}

impl BodyPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "HEAD",
            Self::Neck => "NECK",
            Self::Chest => "CHEST",
            Self::Belt => "BELT",
            Self::Legs => "LEGS",
            Self::Hands => "HANDS",
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BodyPart {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEAD" => Ok(Self::Head),
            "NECK" => Ok(Self::Neck),
            "CHEST" => Ok(Self::Chest),
            "BELT" => Ok(Self::Belt),
            "LEGS" => Ok(Self::Legs),
            "HANDS" => Ok(Self::Hands),
            other => Err(DomainError::parse(format!("unknown body part: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fight {
    pub id: FightId,
    pub player_id: PlayerId,
    pub bot_id: BotId,
    pub status: FightStatus,
    pub created_at: DateTime<Utc>,
}

impl Fight {
    pub fn new(player_id: PlayerId, bot_id: BotId, now: DateTime<Utc>) -> Self {
        Self {
            id: FightId::new(),
            player_id,
            bot_id,
            status: FightStatus::InProgress,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub fight_id: FightId,
    pub player_hp: i64,
    pub bot_hp: i64,
    pub player_damage: i64,
    pub bot_damage: i64,
    pub player_attack_point: Option<BodyPart>,
    pub player_defense_point: Option<BodyPart>,
    pub bot_attack_point: Option<BodyPart>,
    pub bot_defense_point: Option<BodyPart>,
    pub status: FightStatus,
    pub created_at: DateTime<Utc>,
}

impl Round {
    /// The first round of a fight: both combatants at their starting hit
    /// points, nothing declared yet.
    pub fn opening(fight_id: FightId, player_hp: i64, bot_hp: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: RoundId::new(),
            fight_id,
            player_hp,
            bot_hp,
            player_damage: 0,
            bot_damage: 0,
            player_attack_point: None,
            player_defense_point: None,
            bot_attack_point: None,
            bot_defense_point: None,
            status: FightStatus::InProgress,
            created_at: now,
        }
    }
}
