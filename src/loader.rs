//! Runs session commands as background tasks.
//!
//! Every fetch is spawned onto the tokio runtime and its result is posted to
//! an unbounded channel, which the UI loop drains between key presses.

use crate::api::CatalogSource;
use crate::cache::EpisodeCache;
use crate::session::{Command, Loaded};
use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

pub struct Loader {
    source: Arc<dyn CatalogSource>,
    cache: Arc<EpisodeCache>,
    tx: UnboundedSender<Loaded>,
}

impl Loader {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        cache: Arc<EpisodeCache>,
    ) -> (Self, UnboundedReceiver<Loaded>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { source, cache, tx }, rx)
    }

    /// Start the work for `command`. The result arrives on the receiver.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        debug!("Dispatching {:?}", command);
        let tx = self.tx.clone();

        match command {
            Command::FetchShows => {
                let source = self.source.clone();
                tokio::spawn(async move {
                    let result = source.fetch_shows().await;
                    // The receiver is gone once the UI has quit.
                    let _ = tx.send(Loaded::Shows(result));
                })
            }
            Command::FetchEpisodes(show_id) => {
                let cache = self.cache.clone();
                tokio::spawn(async move {
                    let result = cache.get_or_fetch(show_id).await;
                    let _ = tx.send(Loaded::Episodes { show_id, result });
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::types::{Episode, EpisodeId, Show, ShowId};
    use async_trait::async_trait;

    struct FixedSource;

    #[async_trait]
    impl CatalogSource for FixedSource {
        async fn fetch_shows(&self) -> Result<Vec<Show>, FetchError> {
            Ok(vec![Show {
                id: ShowId(1),
                name: "Archer".to_string(),
                genres: Vec::new(),
                status: None,
                rating: None,
                runtime: None,
                summary: None,
                image: None,
            }])
        }

        async fn fetch_episodes(&self, _show_id: ShowId) -> Result<Vec<Episode>, FetchError> {
            Ok(vec![Episode {
                id: EpisodeId(10),
                season: 1,
                number: 1,
                name: "Mole Hunt".to_string(),
                summary: None,
                image: None,
                url: String::new(),
            }])
        }
    }

    fn loader() -> (Loader, UnboundedReceiver<Loaded>, Arc<EpisodeCache>) {
        let source: Arc<dyn CatalogSource> = Arc::new(FixedSource);
        let cache = Arc::new(EpisodeCache::new(source.clone()));
        let (loader, rx) = Loader::new(source, cache.clone());
        (loader, rx, cache)
    }

    #[tokio::test]
    async fn test_fetch_shows_posts_result() {
        let (loader, mut rx, _) = loader();
        loader.dispatch(Command::FetchShows).await.unwrap();

        match rx.recv().await {
            Some(Loaded::Shows(Ok(shows))) => assert_eq!(shows[0].name, "Archer"),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_episodes_fills_cache() {
        let (loader, mut rx, cache) = loader();
        loader.dispatch(Command::FetchEpisodes(ShowId(1))).await.unwrap();

        match rx.recv().await {
            Some(Loaded::Episodes { show_id, result }) => {
                assert_eq!(show_id, ShowId(1));
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected message: {:?}", other),
        }
        assert!(cache.contains(ShowId(1)));
    }
}
