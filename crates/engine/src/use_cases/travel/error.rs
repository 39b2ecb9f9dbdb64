//! Travel operation errors.

use crate::infrastructure::ports::RepoError;
use crate::use_cases::movement::MovementError;

/// Errors that can occur while moving through the world.
#[derive(Debug, thiserror::Error)]
pub enum TravelError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("Locations are not connected")]
    LocationsNotConnected,
    #[error("Already at this location")]
    SameLocation,
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Player is not at any location")]
    PlayerNotPlaced,
    #[error("Movement error: {0}")]
    Movement(#[from] MovementError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
