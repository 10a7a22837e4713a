//! Application state management and input handling.

use crate::config::Keybindings;
use crate::filter::Selection;
use crate::session::{Command, Loaded, Session, View};
use crate::view::{self, SummaryMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use super::types::{Action, Overlay};

/// Application state for the TUI.
pub struct App {
    /// Listing state machine and loaded data
    pub session: Session,
    /// Custom keybindings
    pub keybindings: Keybindings,
    /// How summaries are rendered
    pub summary_mode: SummaryMode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Popup currently shown
    pub overlay: Overlay,
    /// Whether keystrokes go to the filter bar
    pub filter_active: bool,
    /// List state for shows
    pub show_list_state: ListState,
    /// List state for episodes
    pub episode_list_state: ListState,
    /// List state for whichever picker is open
    pub picker_state: ListState,
}

fn step(state: &mut ListState, len: usize, up: bool) {
    let i = state.selected().unwrap_or(0);
    if up {
        state.select(Some(i.saturating_sub(1)));
    } else if i < len.saturating_sub(1) {
        state.select(Some(i + 1));
    }
}

fn dispatch(command: Option<Command>) -> Action {
    command.map(Action::Dispatch).unwrap_or(Action::None)
}

impl App {
    /// Create a new App around a session.
    pub fn new(session: Session, keybindings: Keybindings, summary_mode: SummaryMode) -> Self {
        let mut show_list_state = ListState::default();
        show_list_state.select(Some(0));

        Self {
            session,
            keybindings,
            summary_mode,
            should_quit: false,
            overlay: Overlay::None,
            filter_active: false,
            show_list_state,
            episode_list_state: ListState::default(),
            picker_state: ListState::default(),
        }
    }

    /// Feed a finished fetch into the session.
    pub fn apply(&mut self, loaded: Loaded) -> Action {
        let before = (self.session.view(), self.session.current_show_id());
        let command = self.session.apply(loaded);
        if (self.session.view(), self.session.current_show_id()) != before {
            self.episode_list_state.select(Some(0));
        }
        dispatch(command)
    }

    /// Query text of the active listing.
    pub fn current_query(&self) -> &str {
        match self.session.view() {
            View::ShowsListing => self.session.show_query(),
            View::EpisodesListing => self.session.episode_query(),
        }
    }

    fn set_current_query(&mut self, query: &str) {
        match self.session.view() {
            View::ShowsListing => {
                self.session.set_show_query(query);
                self.show_list_state.select(Some(0));
            }
            View::EpisodesListing => {
                self.session.set_episode_query(query);
                self.episode_list_state.select(Some(0));
            }
        }
    }

    /// Keep list cursors inside their lists after the data changed.
    pub fn clamp_selections(&mut self) {
        let shows = self.session.visible_shows().len();
        let episodes = self.session.visible_episodes().map(|v| v.len()).unwrap_or(0);
        for (state, len) in [
            (&mut self.show_list_state, shows),
            (&mut self.episode_list_state, episodes),
        ] {
            match state.selected() {
                _ if len == 0 => state.select(None),
                Some(i) if i >= len => state.select(Some(len - 1)),
                None => state.select(Some(0)),
                _ => {}
            }
        }
    }

    /// Labels of the open picker.
    pub fn picker_labels(&self) -> Vec<String> {
        match self.overlay {
            Overlay::ShowPicker => view::show_options(self.session.shows())
                .into_iter()
                .map(|(_, label)| label)
                .collect(),
            Overlay::EpisodePicker => view::episode_options(self.session.episodes())
                .into_iter()
                .map(|(_, label)| label)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn open_picker(&mut self, overlay: Overlay) {
        let index = match overlay {
            Overlay::ShowPicker => view::show_options(self.session.shows())
                .iter()
                .position(|(id, _)| *id == self.session.current_show_id()),
            Overlay::EpisodePicker => view::episode_options(self.session.episodes())
                .iter()
                .position(|(sel, _)| *sel == Some(self.session.selection())),
            _ => None,
        };
        self.picker_state.select(Some(index.unwrap_or(0)));
        self.overlay = overlay;
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        // Global quit with Ctrl+C or Ctrl+Q
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                _ => {}
            }
        }

        match self.overlay {
            Overlay::Help => {
                if key.code == KeyCode::Esc
                    || self.keybindings.matches(&self.keybindings.help, &key)
                    || self.keybindings.matches(&self.keybindings.quit, &key)
                {
                    self.overlay = Overlay::None;
                }
                return Action::None;
            }
            Overlay::ShowPicker | Overlay::EpisodePicker => return self.handle_picker_input(key),
            Overlay::None => {}
        }

        if self.filter_active {
            return self.handle_filter_input(key);
        }

        if self.keybindings.matches(&self.keybindings.help, &key) {
            self.overlay = Overlay::Help;
            return Action::None;
        }

        if self.keybindings.matches(&self.keybindings.quit, &key) {
            self.should_quit = true;
            return Action::Quit;
        }

        if self.keybindings.matches(&self.keybindings.filter, &key) {
            self.filter_active = true;
            return Action::None;
        }

        if self.keybindings.matches(&self.keybindings.show_picker, &key) {
            self.open_picker(Overlay::ShowPicker);
            return Action::None;
        }

        match self.session.view() {
            View::ShowsListing => self.handle_show_list_input(key),
            View::EpisodesListing => self.handle_episode_list_input(key),
        }
    }

    fn handle_filter_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.filter_active = false;
                Action::None
            }
            KeyCode::Char(c) => {
                let mut query = self.current_query().to_string();
                query.push(c);
                self.set_current_query(&query);
                Action::None
            }
            KeyCode::Backspace => {
                let mut query = self.current_query().to_string();
                query.pop();
                self.set_current_query(&query);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_show_list_input(&mut self, key: KeyEvent) -> Action {
        let len = self.session.visible_shows().len();

        if self.keybindings.matches(&self.keybindings.up, &key) {
            step(&mut self.show_list_state, len, true);
            Action::None
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            step(&mut self.show_list_state, len, false);
            Action::None
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            let id = self
                .show_list_state
                .selected()
                .and_then(|i| self.session.visible_shows().get(i).map(|s| s.id));
            match id {
                Some(id) => {
                    let command = self.session.select_show(id);
                    self.episode_list_state.select(Some(0));
                    dispatch(command)
                }
                None => Action::None,
            }
        } else if self.keybindings.matches(&self.keybindings.back, &key) {
            if !self.session.show_query().is_empty() {
                self.set_current_query("");
            }
            Action::None
        } else {
            Action::None
        }
    }

    fn handle_episode_list_input(&mut self, key: KeyEvent) -> Action {
        let len = self.session.visible_episodes().map(|v| v.len()).unwrap_or(0);

        if self.keybindings.matches(&self.keybindings.up, &key) {
            step(&mut self.episode_list_state, len, true);
            Action::None
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            step(&mut self.episode_list_state, len, false);
            Action::None
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            let id = self.episode_list_state.selected().and_then(|i| {
                self.session
                    .visible_episodes()
                    .ok()
                    .and_then(|v| v.get(i).map(|e| e.id))
            });
            if let Some(id) = id {
                self.session.select_episode(Selection::Episode(id));
                self.episode_list_state.select(Some(0));
            }
            Action::None
        } else if self.keybindings.matches(&self.keybindings.episode_picker, &key) {
            self.open_picker(Overlay::EpisodePicker);
            Action::None
        } else if self.keybindings.matches(&self.keybindings.back, &key) {
            // Narrowed lists widen first, then leave the show
            if self.session.selection() != Selection::All {
                self.session.select_episode(Selection::All);
            } else if !self.session.episode_query().is_empty() {
                self.set_current_query("");
            } else {
                self.session.back();
                self.show_list_state.select(Some(0));
            }
            self.episode_list_state.select(Some(0));
            Action::None
        } else {
            Action::None
        }
    }

    fn handle_picker_input(&mut self, key: KeyEvent) -> Action {
        let len = self.picker_labels().len();

        if self.keybindings.matches(&self.keybindings.up, &key) {
            step(&mut self.picker_state, len, true);
            Action::None
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            step(&mut self.picker_state, len, false);
            Action::None
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            let index = self.picker_state.selected().unwrap_or(0);
            let overlay = self.overlay;
            self.overlay = Overlay::None;
            self.apply_picker_choice(overlay, index)
        } else if self.keybindings.matches(&self.keybindings.back, &key)
            || self.keybindings.matches(&self.keybindings.quit, &key)
        {
            self.overlay = Overlay::None;
            Action::None
        } else {
            Action::None
        }
    }

    fn apply_picker_choice(&mut self, overlay: Overlay, index: usize) -> Action {
        match overlay {
            Overlay::ShowPicker => {
                let options = view::show_options(self.session.shows());
                match options.get(index) {
                    Some((Some(id), _)) => {
                        let command = self.session.select_show(*id);
                        self.episode_list_state.select(Some(0));
                        dispatch(command)
                    }
                    Some((None, _)) => {
                        self.session.deselect_show();
                        Action::None
                    }
                    None => Action::None,
                }
            }
            Overlay::EpisodePicker => {
                let options = view::episode_options(self.session.episodes());
                if let Some((Some(selection), _)) = options.get(index) {
                    self.session.select_episode(*selection);
                    self.episode_list_state.select(Some(0));
                }
                Action::None
            }
            _ => Action::None,
        }
    }
}
