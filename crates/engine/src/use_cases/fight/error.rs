//! Fight operation errors.

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while starting or inspecting fights.
#[derive(Debug, thiserror::Error)]
pub enum FightError {
    #[error("Bot not found: {0}")]
    BotNotFound(String),
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Bot is not at the player's location")]
    BotNotPresent,
    #[error("No fight in progress")]
    NoActiveFight,
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
