//! Player lifecycle errors.

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Username already taken: {0}")]
    UsernameTaken(String),
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
