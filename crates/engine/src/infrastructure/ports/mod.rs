//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete
//! types. Ports exist for:
//! - Database access (repositories and the transactional store)
//! - Clock (for testing)

mod error;
mod repos;
mod store;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{BotRepo, FightRepo, ItemRepo, LocationRepo, MovementRepo, PlayerRepo};

// =============================================================================
// Transactional Store Port
// =============================================================================
pub use store::{StorePort, StoreTx};

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{
    MockBotRepo, MockFightRepo, MockItemRepo, MockLocationRepo, MockMovementRepo, MockPlayerRepo,
};

#[cfg(test)]
pub use store::{MockStorePort, MockStoreTx};

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
