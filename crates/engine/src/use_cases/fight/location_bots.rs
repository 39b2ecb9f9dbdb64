//! Listing the bots present at a location.

use std::sync::Arc;

use mirefell_domain::entities::Bot;

use crate::infrastructure::ports::{BotRepo, LocationRepo};
use crate::use_cases::fight::FightError;

/// Lists the bots placed at a location, by name.
pub struct ListLocationBots {
    locations: Arc<dyn LocationRepo>,
    bots: Arc<dyn BotRepo>,
}

impl ListLocationBots {
    pub fn new(locations: Arc<dyn LocationRepo>, bots: Arc<dyn BotRepo>) -> Self {
        Self { locations, bots }
    }

    pub async fn execute(&self, location_slug: &str) -> Result<Vec<Bot>, FightError> {
        let location = self
            .locations
            .find_by_slug(location_slug)
            .await?
            .ok_or_else(|| FightError::LocationNotFound(location_slug.to_owned()))?;

        Ok(self.bots.list_at_location(location.id).await?)
    }
}
