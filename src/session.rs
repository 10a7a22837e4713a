//! Session state and the listing state machine.
//!
//! The session owns everything the UI needs to know: the loaded shows, the
//! current show and its episodes, both filter inputs and the status line. It
//! never waits on the network itself. Operations that need data return a
//! [`Command`]; the result comes back later through [`Session::apply`].

use crate::cache::EpisodeCache;
use crate::error::{AppError, FetchError};
use crate::filter::{self, Selection};
use crate::types::{Episode, Show, ShowId};
use crate::view;
use log::{debug, info, warn};
use std::sync::Arc;

/// Which listing is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    ShowsListing,
    EpisodesListing,
}

/// What the status line reports besides the counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading(String),
    Info(String),
    Error(String),
}

/// Work the session needs done outside of itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FetchShows,
    FetchEpisodes(ShowId),
}

/// Completed work, fed back into the session.
#[derive(Debug)]
pub enum Loaded {
    Shows(Result<Vec<Show>, FetchError>),
    Episodes {
        show_id: ShowId,
        result: Result<Arc<Vec<Episode>>, FetchError>,
    },
}

const SHOWS_FAILED: &str = "Sorry, something went wrong while loading the list of shows.";
const EPISODES_FAILED: &str = "Sorry, something went wrong while loading the episodes for this show.";

/// Explicit session state.
pub struct Session {
    cache: Arc<EpisodeCache>,
    view: View,
    shows: Vec<Show>,
    show_query: String,
    current_show: Option<ShowId>,
    episodes: Arc<Vec<Episode>>,
    episode_query: String,
    selection: Selection,
    pending: Option<ShowId>,
    status: Status,
    initial_show: Option<ShowId>,
}

impl Session {
    pub fn new(cache: Arc<EpisodeCache>) -> Self {
        Self {
            cache,
            view: View::ShowsListing,
            shows: Vec::new(),
            show_query: String::new(),
            current_show: None,
            episodes: Arc::new(Vec::new()),
            episode_query: String::new(),
            selection: Selection::All,
            pending: None,
            status: Status::Idle,
            initial_show: None,
        }
    }

    /// Show to open as soon as the show list arrives.
    pub fn with_initial_show(mut self, show_id: Option<ShowId>) -> Self {
        self.initial_show = show_id;
        self
    }

    /// Kick off the session by loading the show list.
    pub fn start(&mut self) -> Command {
        self.status = Status::Loading("Loading shows, please wait…".to_string());
        Command::FetchShows
    }

    /// Feed a finished fetch back in.
    pub fn apply(&mut self, loaded: Loaded) -> Option<Command> {
        match loaded {
            Loaded::Shows(result) => self.shows_loaded(result),
            Loaded::Episodes { show_id, result } => {
                self.episodes_loaded(show_id, result);
                None
            }
        }
    }

    pub fn shows_loaded(&mut self, result: Result<Vec<Show>, FetchError>) -> Option<Command> {
        match result {
            Ok(shows) => {
                info!("Loaded {} shows", shows.len());
                self.shows = shows;
                self.status = Status::Idle;

                let initial = self.initial_show.take()?;
                if self.shows.iter().any(|s| s.id == initial) {
                    self.select_show(initial)
                } else {
                    warn!("Configured show {} is not in the catalog", initial);
                    None
                }
            }
            Err(e) => {
                warn!("Failed to load shows: {}", e);
                self.status = Status::Error(SHOWS_FAILED.to_string());
                None
            }
        }
    }

    /// Open a show's episodes, fetching them if they are not cached yet.
    pub fn select_show(&mut self, show_id: ShowId) -> Option<Command> {
        if self.pending == Some(show_id) {
            debug!("Episodes for show {} already in flight", show_id);
            return None;
        }

        if let Some(episodes) = self.cache.get(show_id) {
            self.pending = None;
            self.enter_episodes(show_id, episodes);
            return None;
        }

        self.pending = Some(show_id);
        self.status = Status::Loading("Loading episodes for this show…".to_string());
        Some(Command::FetchEpisodes(show_id))
    }

    /// Commit fetched episodes, unless the user has moved on since.
    pub fn episodes_loaded(
        &mut self,
        show_id: ShowId,
        result: Result<Arc<Vec<Episode>>, FetchError>,
    ) {
        if self.pending != Some(show_id) {
            debug!("Discarding stale episode response for show {}", show_id);
            return;
        }
        self.pending = None;

        match result {
            Ok(episodes) => self.enter_episodes(show_id, episodes),
            Err(e) => {
                warn!("Failed to load episodes for show {}: {}", show_id, e);
                self.status = Status::Error(EPISODES_FAILED.to_string());
            }
        }
    }

    fn enter_episodes(&mut self, show_id: ShowId, episodes: Arc<Vec<Episode>>) {
        debug!("Showing {} episodes of show {}", episodes.len(), show_id);
        self.current_show = Some(show_id);
        self.episodes = episodes;
        self.episode_query.clear();
        self.selection = Selection::All;
        self.status = Status::Idle;
        self.view = View::EpisodesListing;
    }

    /// Drop the current show entirely.
    pub fn deselect_show(&mut self) {
        self.current_show = None;
        self.pending = None;
        self.episodes = Arc::new(Vec::new());
        self.episode_query.clear();
        self.selection = Selection::All;
        self.view = View::ShowsListing;
        self.status = Status::Info("Please select a show.".to_string());
    }

    /// Return to the show listing. A fetch still in flight lands in the
    /// cache but no longer opens its show.
    pub fn back(&mut self) {
        if let Some(show_id) = self.pending.take() {
            debug!("No longer waiting on episodes for show {}", show_id);
            self.status = Status::Idle;
        }
        self.view = View::ShowsListing;
        self.show_query.clear();
        self.clear_notice();
    }

    pub fn set_show_query(&mut self, query: &str) {
        self.show_query = query.to_string();
    }

    /// Typing puts the picker back on "All episodes".
    pub fn set_episode_query(&mut self, query: &str) {
        self.episode_query = query.to_string();
        self.selection = Selection::All;
        self.clear_notice();
    }

    /// Apply an episode picker choice.
    pub fn select_episode(&mut self, selection: Selection) {
        if let Selection::Episode(id) = selection {
            if !self.episodes.iter().any(|e| e.id == id) {
                warn!("Episode {} is not part of the current list", id);
                self.status = Status::Error("Could not find that episode.".to_string());
                return;
            }
            self.episode_query.clear();
        }
        self.selection = selection;
        self.clear_notice();
    }

    /// Drop an error or info message; a loading message stays until its fetch lands.
    fn clear_notice(&mut self) {
        if matches!(self.status, Status::Error(_) | Status::Info(_)) {
            self.status = Status::Idle;
        }
    }

    pub fn visible_shows(&self) -> Vec<&Show> {
        filter::visible_shows(&self.shows, &self.show_query)
    }

    pub fn visible_episodes(&self) -> Result<Vec<&Episode>, AppError> {
        filter::visible(&self.episodes, &self.episode_query, self.selection)
    }

    /// The line under the listing: a loading/error message or the counts.
    pub fn status_message(&self) -> String {
        match &self.status {
            Status::Loading(msg) | Status::Info(msg) | Status::Error(msg) => msg.clone(),
            Status::Idle => match self.view {
                View::ShowsListing => {
                    view::show_count_message(self.visible_shows().len(), self.shows.len())
                }
                View::EpisodesListing => match self.visible_episodes() {
                    Ok(visible) => view::count_message(visible.len(), self.episodes.len()),
                    Err(e) => e.to_string(),
                },
            },
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn show_query(&self) -> &str {
        &self.show_query
    }

    pub fn episode_query(&self) -> &str {
        &self.episode_query
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn current_show(&self) -> Option<&Show> {
        let id = self.current_show?;
        self.shows.iter().find(|s| s.id == id)
    }

    pub fn current_show_id(&self) -> Option<ShowId> {
        self.current_show
    }

    pub fn pending(&self) -> Option<ShowId> {
        self.pending
    }

    pub fn cache(&self) -> &Arc<EpisodeCache> {
        &self.cache
    }
}
