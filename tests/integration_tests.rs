//! Integration tests for show-browser.
//!
//! These tests drive the session, cache and loader together against an
//! in-memory catalog.

use async_trait::async_trait;
use show_browser::api::CatalogSource;
use show_browser::cache::EpisodeCache;
use show_browser::error::FetchError;
use show_browser::filter::{self, Selection};
use show_browser::loader::Loader;
use show_browser::session::{Command, Loaded, Session, Status, View};
use show_browser::types::{Episode, EpisodeId, Show, ShowId};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn show(id: u64, name: &str) -> Show {
    Show {
        id: ShowId(id),
        name: name.to_string(),
        genres: Vec::new(),
        status: None,
        rating: None,
        runtime: None,
        summary: None,
        image: None,
    }
}

fn episode(id: u64, number: u32, name: &str, summary: &str) -> Episode {
    Episode {
        id: EpisodeId(id),
        season: 1,
        number,
        name: name.to_string(),
        summary: Some(summary.to_string()),
        image: None,
        url: format!("https://example.test/episodes/{}", id),
    }
}

fn pilot_and_second() -> Vec<Episode> {
    vec![
        episode(10, 1, "Pilot", "intro"),
        episode(11, 2, "Second", "fight scene"),
    ]
}

/// Catalog with two shows. Show 5 answers with a 500 while it is broken.
#[derive(Default)]
struct FakeCatalog {
    episode_fetches: AtomicUsize,
    broken: Mutex<HashSet<ShowId>>,
}

impl FakeCatalog {
    fn fetches(&self) -> usize {
        self.episode_fetches.load(Ordering::SeqCst)
    }

    fn set_broken(&self, show_id: ShowId, broken: bool) {
        let mut set = self.broken.lock().unwrap();
        if broken {
            set.insert(show_id);
        } else {
            set.remove(&show_id);
        }
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_shows(&self) -> Result<Vec<Show>, FetchError> {
        Ok(vec![show(1, "Archer"), show(2, "Arrow"), show(5, "Flaky")])
    }

    async fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, FetchError> {
        self.episode_fetches.fetch_add(1, Ordering::SeqCst);
        if self.broken.lock().unwrap().contains(&show_id) {
            return Err(FetchError::Status {
                url: format!("https://example.test/shows/{}/episodes", show_id),
                status: 500,
            });
        }
        Ok(pilot_and_second())
    }
}

struct Harness {
    catalog: Arc<FakeCatalog>,
    cache: Arc<EpisodeCache>,
    session: Session,
}

fn harness() -> Harness {
    let catalog = Arc::new(FakeCatalog::default());
    let source: Arc<dyn CatalogSource> = catalog.clone();
    let cache = Arc::new(EpisodeCache::new(source));
    let session = Session::new(cache.clone());
    Harness {
        catalog,
        cache,
        session,
    }
}

impl Harness {
    /// Run a command the way the loader would and feed the result back.
    async fn run(&mut self, command: Command) -> Option<Command> {
        let loaded = match command {
            Command::FetchShows => Loaded::Shows(self.catalog.fetch_shows().await),
            Command::FetchEpisodes(show_id) => Loaded::Episodes {
                show_id,
                result: self.cache.get_or_fetch(show_id).await,
            },
        };
        self.session.apply(loaded)
    }

    async fn boot(&mut self) {
        let command = self.session.start();
        assert!(self.run(command).await.is_none());
    }
}

/// Show filtering is a case-insensitive substring match.
#[tokio::test]
async fn test_show_filter_matches_case_insensitively() {
    let mut h = harness();
    h.boot().await;

    h.session.set_show_query("arc");
    let names: Vec<&str> = h
        .session
        .visible_shows()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["Archer"]);
    assert_eq!(h.session.status_message(), "Showing 1 / 3 shows");
}

/// Episode filtering checks names and summaries and reports counts.
#[tokio::test]
async fn test_episode_query_filters_and_counts() {
    let mut h = harness();
    h.boot().await;

    let command = h.session.select_show(ShowId(1)).unwrap();
    assert!(h.run(command).await.is_none());
    assert_eq!(h.session.view(), View::EpisodesListing);

    h.session.set_episode_query("fight");
    let ids: Vec<EpisodeId> = h
        .session
        .visible_episodes()
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![EpisodeId(11)]);
    assert_eq!(h.session.status_message(), "Showing 1 / 2 episodes");
}

/// A failed fetch is reported, left out of the cache and retried on reselect.
#[tokio::test]
async fn test_failed_fetch_is_retried_on_reselect() {
    let mut h = harness();
    h.boot().await;
    h.catalog.set_broken(ShowId(5), true);

    let command = h.session.select_show(ShowId(5)).unwrap();
    h.run(command).await;

    assert!(!h.cache.contains(ShowId(5)));
    assert_eq!(
        h.session.status(),
        &Status::Error(
            "Sorry, something went wrong while loading the episodes for this show.".to_string()
        )
    );
    assert_eq!(h.session.view(), View::ShowsListing);
    assert_eq!(h.catalog.fetches(), 1);

    h.catalog.set_broken(ShowId(5), false);
    let retry = h.session.select_show(ShowId(5));
    assert_eq!(retry, Some(Command::FetchEpisodes(ShowId(5))));
    h.run(Command::FetchEpisodes(ShowId(5))).await;

    assert_eq!(h.catalog.fetches(), 2);
    assert!(h.cache.contains(ShowId(5)));
    assert_eq!(h.session.view(), View::EpisodesListing);
}

/// Picking an episode wins over whatever query was typed.
#[tokio::test]
async fn test_episode_pick_overrides_query() {
    let mut h = harness();
    h.boot().await;
    let command = h.session.select_show(ShowId(1)).unwrap();
    h.run(command).await;

    h.session.set_episode_query("fight");
    h.session.select_episode(Selection::Episode(EpisodeId(11)));

    let visible = h.session.visible_episodes().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, EpisodeId(11));

    // The pure filter agrees even with the query still applied
    let episodes = pilot_and_second();
    let direct = filter::visible(&episodes, "fight", Selection::Episode(EpisodeId(11))).unwrap();
    assert_eq!(direct[0].id, EpisodeId(11));
    let pilot = filter::visible(&episodes, "fight", Selection::Episode(EpisodeId(10))).unwrap();
    assert_eq!(pilot[0].id, EpisodeId(10));
}

/// Two sequential lookups hit the network once.
#[tokio::test]
async fn test_get_or_fetch_twice_fetches_once() {
    let h = harness();

    let first = h.cache.get_or_fetch(ShowId(1)).await.unwrap();
    let second = h.cache.get_or_fetch(ShowId(1)).await.unwrap();

    assert_eq!(h.catalog.fetches(), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

/// Coming back to a show reuses the cached episode list.
#[tokio::test]
async fn test_reselecting_a_show_uses_the_cache() {
    let mut h = harness();
    h.boot().await;

    let command = h.session.select_show(ShowId(2)).unwrap();
    h.run(command).await;
    h.session.back();

    assert_eq!(h.session.select_show(ShowId(2)), None);
    assert_eq!(h.session.view(), View::EpisodesListing);
    assert_eq!(h.catalog.fetches(), 1);
}

/// An empty query with "all episodes" shows the whole working set.
#[test]
fn test_empty_query_shows_everything() {
    let episodes = pilot_and_second();
    let visible = filter::visible(&episodes, "", Selection::All).unwrap();
    let expected: Vec<&Episode> = episodes.iter().collect();
    assert_eq!(visible, expected);
}

/// The loader runs commands in the background and reports back.
#[tokio::test]
async fn test_loader_round_trip() {
    let catalog = Arc::new(FakeCatalog::default());
    let source: Arc<dyn CatalogSource> = catalog.clone();
    let cache = Arc::new(EpisodeCache::new(source.clone()));
    let (loader, mut rx) = Loader::new(source, cache.clone());
    let mut session = Session::new(cache).with_initial_show(Some(ShowId(2)));

    loader.dispatch(session.start()).await.unwrap();
    let loaded = rx.recv().await.unwrap();
    let next = session.apply(loaded);
    assert_eq!(next, Some(Command::FetchEpisodes(ShowId(2))));

    loader.dispatch(Command::FetchEpisodes(ShowId(2))).await.unwrap();
    let loaded = rx.recv().await.unwrap();
    assert_eq!(session.apply(loaded), None);

    assert_eq!(session.view(), View::EpisodesListing);
    assert_eq!(session.current_show_id(), Some(ShowId(2)));
    assert_eq!(session.episodes().len(), 2);
    assert_eq!(catalog.fetches(), 1);
}
