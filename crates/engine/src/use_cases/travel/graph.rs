//! In-memory snapshot of the world map.
//!
//! The graph is built once at startup from the persisted locations and
//! their connections, then shared read-only across the engine. Every
//! connection is undirected: persisting a single direction is enough for
//! both endpoints to see each other as neighbours.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{PoisonError, RwLock};

use mirefell_domain::entities::{Location, LocationLink};
use mirefell_domain::LocationId;

use crate::infrastructure::ports::LocationRepo;
use crate::use_cases::travel::TravelError;

/// Undirected adjacency view over the active locations.
pub struct LocationGraph {
    inner: RwLock<GraphInner>,
}

#[derive(Default)]
struct GraphInner {
    adjacency: HashMap<LocationId, Vec<LocationId>>,
    ids_by_slug: HashMap<String, LocationId>,
    slugs_by_id: HashMap<LocationId, String>,
}

impl LocationGraph {
    /// Builds the graph from already-loaded locations and links.
    ///
    /// Links that reference an unknown endpoint are ignored rather than
    /// treated as an error; they can appear while locations are being
    /// retired.
    pub fn build(locations: &[Location], links: &[LocationLink]) -> Self {
        let mut inner = GraphInner::default();
        for location in locations {
            inner.ids_by_slug.insert(location.slug.clone(), location.id);
            inner.slugs_by_id.insert(location.id, location.slug.clone());
            inner.adjacency.entry(location.id).or_default();
        }
        for link in links {
            if !inner.slugs_by_id.contains_key(&link.from)
                || !inner.slugs_by_id.contains_key(&link.to)
            {
                continue;
            }
            insert_edge(&mut inner.adjacency, link.from, link.to);
            insert_edge(&mut inner.adjacency, link.to, link.from);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Loads all active locations and their connections from the store
    /// and builds the graph.
    pub async fn load(repo: &dyn LocationRepo) -> Result<Self, TravelError> {
        let locations = repo.list_active().await?;
        let links = repo.list_links().await?;
        tracing::info!(
            locations = locations.len(),
            links = links.len(),
            "loaded world map"
        );
        Ok(Self::build(&locations, &links))
    }

    /// Finds a minimum-hop route between two locations.
    ///
    /// The returned route lists the slugs to visit in order, excluding
    /// the starting location and including the destination. Asking for a
    /// route from a location to itself yields a single-element route.
    pub fn find_shortest_path(
        &self,
        from_slug: &str,
        to_slug: &str,
    ) -> Result<Vec<String>, TravelError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);

        let from = *inner
            .ids_by_slug
            .get(from_slug)
            .ok_or_else(|| TravelError::LocationNotFound(from_slug.to_owned()))?;
        let to = *inner
            .ids_by_slug
            .get(to_slug)
            .ok_or_else(|| TravelError::LocationNotFound(to_slug.to_owned()))?;

        if from == to {
            return Ok(vec![to_slug.to_owned()]);
        }

        // Breadth-first search; neighbours are visited in insertion
        // order, so ties between equal-length routes are stable.
        let mut visited: HashSet<LocationId> = HashSet::new();
        let mut predecessors: HashMap<LocationId, LocationId> = HashMap::new();
        let mut queue: VecDeque<LocationId> = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);

        'search: while let Some(current) = queue.pop_front() {
            let Some(neighbours) = inner.adjacency.get(&current) else {
                continue;
            };
            for &next in neighbours {
                if !visited.insert(next) {
                    continue;
                }
                predecessors.insert(next, current);
                if next == to {
                    break 'search;
                }
                queue.push_back(next);
            }
        }

        if !predecessors.contains_key(&to) {
            return Err(TravelError::LocationsNotConnected);
        }

        let mut ids = vec![to];
        let mut cursor = to;
        while let Some(&previous) = predecessors.get(&cursor) {
            if previous == from {
                break;
            }
            ids.push(previous);
            cursor = previous;
        }
        ids.reverse();

        Ok(ids
            .iter()
            .filter_map(|id| inner.slugs_by_id.get(id).cloned())
            .collect())
    }

    /// Returns the slug of a known location.
    pub fn slug_of(&self, id: LocationId) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.slugs_by_id.get(&id).cloned()
    }
}

fn insert_edge(
    adjacency: &mut HashMap<LocationId, Vec<LocationId>>,
    from: LocationId,
    to: LocationId,
) {
    let neighbours = adjacency.entry(from).or_default();
    if !neighbours.contains(&to) {
        neighbours.push(to);
    }
}
