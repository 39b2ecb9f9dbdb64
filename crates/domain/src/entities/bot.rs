//! Hostile bots players can engage.
//!
//! Bots are catalog entries; where they stand is a separate placement
//! record, so one bot definition can appear at several locations.

use serde::{Deserialize, Serialize};

use crate::ids::BotId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    pub id: BotId,
    pub name: String,
    pub slug: String,
    pub level: i64,
    pub attack: i64,
    pub defense: i64,
    pub hp: i64,
}

impl Bot {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: BotId::new(),
            name: name.into(),
            slug: slug.into(),
            level: 1,
            attack: 1,
            defense: 1,
            hp: 10,
        }
    }
}
