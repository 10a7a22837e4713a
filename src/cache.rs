//! Per-session episode cache.
//!
//! Each show gets one slot, reserved in the map before any request is made.
//! Callers that race on the same uncached show wait on that slot instead of
//! starting a second request. A failed fetch leaves the slot empty, so the
//! next access tries again; callers already waiting on that slot take turns
//! retrying, one request at a time. Empty slots stay in the map and count
//! as uncached.

use crate::api::CatalogSource;
use crate::error::FetchError;
use crate::types::{Episode, ShowId};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<Arc<Vec<Episode>>>>;

/// Show id to episode list, filled at most once per show.
pub struct EpisodeCache {
    source: Arc<dyn CatalogSource>,
    slots: Mutex<HashMap<ShowId, Slot>>,
}

impl EpisodeCache {
    /// Create an empty cache that fetches through `source`.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, show_id: ShowId) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(show_id).or_default().clone()
    }

    /// Return the episodes of `show_id`, fetching them on first use.
    pub async fn get_or_fetch(&self, show_id: ShowId) -> Result<Arc<Vec<Episode>>, FetchError> {
        let slot = self.slot(show_id);

        if let Some(episodes) = slot.get() {
            debug!("Episode cache hit for show {}", show_id);
            return Ok(episodes.clone());
        }

        let episodes = slot
            .get_or_try_init(|| async {
                debug!("Episode cache miss for show {}, fetching", show_id);
                self.source
                    .fetch_episodes(show_id)
                    .await
                    .map(Arc::new)
                    .inspect_err(|e| warn!("Fetching episodes for show {} failed: {}", show_id, e))
            })
            .await?;

        Ok(episodes.clone())
    }

    /// Peek at a cached list without touching the network.
    pub fn get(&self, show_id: ShowId) -> Option<Arc<Vec<Episode>>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(&show_id).and_then(|slot| slot.get().cloned())
    }

    pub fn contains(&self, show_id: ShowId) -> bool {
        self.get(show_id).is_some()
    }

    /// Number of shows with a stored episode list.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
