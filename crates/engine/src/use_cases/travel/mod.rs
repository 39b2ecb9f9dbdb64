//! Moving players around the world map.

mod error;
mod graph;
mod move_to_location;
mod travel_to_cell;

pub use error::TravelError;
pub use graph::LocationGraph;
pub use move_to_location::MoveToLocation;
pub use travel_to_cell::TravelToCell;
