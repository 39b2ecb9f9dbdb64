//! World locations.

use serde::{Deserialize, Serialize};

use crate::ids::LocationId;

/// A node in the world map.
///
/// Cells are open-world tiles reachable by timed traversal; non-cell
/// locations (towns, shops) are entered directly. Inactive locations stay
/// in storage but are excluded from the adjacency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub slug: String,
    pub is_cell: bool,
    pub inactive: bool,
}

impl Location {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
            slug: slug.into(),
            is_cell: false,
            inactive: false,
        }
    }

    pub fn cell(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let mut location = Self::new(name, slug);
        location.is_cell = true;
        location
    }
}

/// An undirected edge between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationLink {
    pub from: LocationId,
    pub to: LocationId,
}
