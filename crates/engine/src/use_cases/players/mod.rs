//! Player account lifecycle.

mod create_player;
mod error;
mod get_player;

pub use create_player::CreatePlayer;
pub use error::PlayerError;
pub use get_player::GetPlayer;
