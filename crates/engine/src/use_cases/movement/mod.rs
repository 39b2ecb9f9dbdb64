//! Background movement sessions.
//!
//! Each travelling player owns at most one session. A session walks a
//! pre-planned route one cell per tick on a spawned task; starting a new
//! session for the same player cancels and finalizes the old one first.
//! Cancellation is cooperative and observed at tick boundaries, so a step
//! that has already begun resolving completes before the worker stops.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

use mirefell_domain::{LocationId, MovementId, MovementSession, MovementStep, PlayerId};

use crate::infrastructure::ports::{ClockPort, LocationRepo, MovementRepo, PlayerRepo, RepoError};


struct ActiveMovement {
    generation: u64,
    movement_id: MovementId,
    cancel: CancellationToken,
}

/// Tracks the per-player movement workers and starts new ones.
pub struct MovementSessions {
    players: Arc<dyn PlayerRepo>,
    locations: Arc<dyn LocationRepo>,
    movements: Arc<dyn MovementRepo>,
    clock: Arc<dyn ClockPort>,
    tick: Duration,
    active: Arc<DashMap<PlayerId, ActiveMovement>>,
    next_generation: AtomicU64,
}

impl MovementSessions {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        locations: Arc<dyn LocationRepo>,
        movements: Arc<dyn MovementRepo>,
        clock: Arc<dyn ClockPort>,
        tick: Duration,
    ) -> Self {
        Self {
            players,
            locations,
            movements,
            clock,
            tick,
            active: Arc::new(DashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Starts a session that walks `route` (a list of cell slugs) for the
    /// player, one cell per tick.
    ///
    /// The newest request wins: an already-running session for the same
    /// player is cancelled and finalized before the new one is recorded.
    pub async fn start(
        &self,
        player_id: PlayerId,
        route: Vec<String>,
    ) -> Result<MovementId, MovementError> {
        let player = self
            .players
            .get(player_id)
            .await?
            .ok_or(MovementError::PlayerNotFound)?;

        if let Some((_, previous)) = self.active.remove(&player_id) {
            previous.cancel.cancel();
            self.movements.finish_session(previous.movement_id).await?;
            tracing::debug!(
                player_id = %player_id,
                movement_id = %previous.movement_id,
                "superseded active movement session"
            );
        }

        let session = MovementSession::new(player_id, self.clock.now());
        self.movements.create_session(&session).await?;

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();
        self.active.insert(
            player_id,
            ActiveMovement {
                generation,
                movement_id: session.id,
                cancel: cancel.clone(),
            },
        );

        let worker = SessionWorker {
            locations: Arc::clone(&self.locations),
            movements: Arc::clone(&self.movements),
            clock: Arc::clone(&self.clock),
            active: Arc::clone(&self.active),
            tick: self.tick,
            player_id,
            movement_id: session.id,
            generation,
            cancel,
            route,
            from: player.location_id,
        };
        tokio::spawn(worker.run());

        Ok(session.id)
    }

    /// The session currently walking for this player, if any.
    pub fn active_movement(&self, player_id: PlayerId) -> Option<MovementId> {
        self.active.get(&player_id).map(|entry| entry.movement_id)
    }

    /// Asks every running worker to stop at its next tick boundary.
    pub fn cancel_all(&self) {
        for entry in self.active.iter() {
            entry.value().cancel.cancel();
        }
    }
}

/// One spawned walk. Owns everything it needs so the manager can be
/// dropped while workers drain.
struct SessionWorker {
    locations: Arc<dyn LocationRepo>,
    movements: Arc<dyn MovementRepo>,
    clock: Arc<dyn ClockPort>,
    active: Arc<DashMap<PlayerId, ActiveMovement>>,
    tick: Duration,
    player_id: PlayerId,
    movement_id: MovementId,
    generation: u64,
    cancel: CancellationToken,
    route: Vec<String>,
    from: Option<LocationId>,
}

impl SessionWorker {
    async fn run(self) {
        let mut from = self.from;

        for slug in &self.route {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(self.tick) => {}
            }

            let next = match self.locations.find_by_slug(slug).await {
                Ok(Some(location)) => location,
                Ok(None) => {
                    tracing::warn!(
                        movement_id = %self.movement_id,
                        slug = %slug,
                        "route step does not resolve to a location, skipping"
                    );
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        movement_id = %self.movement_id,
                        slug = %slug,
                        error = %e,
                        "failed to resolve route step, skipping"
                    );
                    continue;
                }
            };

            let step = MovementStep {
                movement_id: self.movement_id,
                from_location_id: from.unwrap_or(next.id),
                to_location_id: next.id,
                created_at: self.clock.now(),
            };
            if let Err(e) = self.movements.record_step(&step, self.player_id).await {
                tracing::warn!(
                    movement_id = %self.movement_id,
                    error = %e,
                    "failed to record movement step"
                );
                continue;
            }

            tracing::debug!(
                player_id = %self.player_id,
                cell = %next.slug,
                "player stepped into cell"
            );
            from = Some(next.id);
        }

        if let Err(e) = self.movements.finish_session(self.movement_id).await {
            tracing::error!(
                movement_id = %self.movement_id,
                error = %e,
                "failed to finalize movement session"
            );
        }

        // A successor may have replaced our registry entry; only clear our own.
        self.active
            .remove_if(&self.player_id, |_, entry| entry.generation == self.generation);
    }
}

/// Errors that can occur while managing movement sessions.
#[derive(Debug, thiserror::Error)]
pub enum MovementError {
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
