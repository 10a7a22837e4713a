//! View models: what the UI shows, computed from plain data.
//!
//! Nothing here touches the terminal. The `tui` module draws these.

use crate::filter::Selection;
use crate::types::{Episode, Show, ShowId};

/// How summary markup from the catalog is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryMode {
    /// Convert HTML to plain text
    #[default]
    Plain,
    /// Pass the catalog text through untouched
    Raw,
}

/// Render a summary for display.
///
/// # Examples
///
/// ```
/// use show_browser::view::{summary_text, SummaryMode};
///
/// assert_eq!(summary_text(Some("<p>Hello there</p>"), SummaryMode::Plain), "Hello there");
/// assert_eq!(summary_text(Some("<p>Hi</p>"), SummaryMode::Raw), "<p>Hi</p>");
/// assert_eq!(summary_text(None, SummaryMode::Plain), "");
/// ```
pub fn summary_text(raw: Option<&str>, mode: SummaryMode) -> String {
    match (raw, mode) {
        (None, _) => String::new(),
        (Some(s), SummaryMode::Raw) => s.to_string(),
        (Some(s), SummaryMode::Plain) => nanohtml2text::html2text(s).trim().to_string(),
    }
}

/// One entry of the show listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowCard {
    pub id: ShowId,
    pub title: String,
    pub genres: String,
    pub status: String,
    pub rating: String,
    pub runtime: String,
    pub summary: String,
    pub image: String,
}

impl ShowCard {
    pub fn new(show: &Show, mode: SummaryMode) -> Self {
        Self {
            id: show.id,
            title: show.name.clone(),
            genres: show.genre_list(),
            status: show.status.clone().unwrap_or_else(|| "N/A".to_string()),
            rating: show
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            runtime: match show.runtime {
                Some(minutes) => format!("{} mins", minutes),
                None => "? mins".to_string(),
            },
            summary: summary_text(show.summary.as_deref(), mode),
            image: show.image.clone().unwrap_or_default(),
        }
    }
}

/// One entry of the episode listing.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeCard {
    pub heading: String,
    pub image: String,
    pub summary: String,
    pub link: String,
}

impl EpisodeCard {
    pub fn new(episode: &Episode, mode: SummaryMode) -> Self {
        Self {
            heading: episode.to_display(),
            image: episode.image.clone().unwrap_or_default(),
            summary: summary_text(episode.summary.as_deref(), mode),
            link: format!("View on TVMaze: {}", episode.url),
        }
    }
}

/// Entries of the show picker. `None` is the "no show" entry.
pub fn show_options(shows: &[Show]) -> Vec<(Option<ShowId>, String)> {
    let mut sorted: Vec<&Show> = shows.iter().collect();
    sorted.sort_by_cached_key(|s| s.name.to_lowercase());

    std::iter::once((None, "Select a show...".to_string()))
        .chain(sorted.into_iter().map(|s| (Some(s.id), s.name.clone())))
        .collect()
}

/// Entries of the episode picker. `None` marks the inert "No episodes" entry.
pub fn episode_options(episodes: &[Episode]) -> Vec<(Option<Selection>, String)> {
    if episodes.is_empty() {
        return vec![(None, "No episodes".to_string())];
    }

    std::iter::once((Some(Selection::All), "All episodes".to_string()))
        .chain(
            episodes
                .iter()
                .map(|e| (Some(Selection::Episode(e.id)), e.to_display())),
        )
        .collect()
}

/// The episode count line.
///
/// # Examples
///
/// ```
/// use show_browser::view::count_message;
///
/// assert_eq!(count_message(1, 2), "Showing 1 / 2 episodes");
/// assert_eq!(count_message(0, 0), "No episodes loaded.");
/// ```
pub fn count_message(showing: usize, total: usize) -> String {
    if total == 0 {
        "No episodes loaded.".to_string()
    } else {
        format!("Showing {} / {} episodes", showing, total)
    }
}

pub fn show_count_message(showing: usize, total: usize) -> String {
    format!("Showing {} / {} shows", showing, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EpisodeId;

    fn show(id: u64, name: &str) -> Show {
        Show {
            id: ShowId(id),
            name: name.to_string(),
            genres: vec!["Drama".to_string(), "Thriller".to_string()],
            status: Some("Running".to_string()),
            rating: Some(7.5),
            runtime: Some(42),
            summary: Some("<p>A tense drama.</p>".to_string()),
            image: None,
        }
    }

    fn episode(id: u64, number: u32, name: &str) -> Episode {
        Episode {
            id: EpisodeId(id),
            season: 1,
            number,
            name: name.to_string(),
            summary: None,
            image: Some("https://static.tvmaze.com/ep.jpg".to_string()),
            url: format!("https://www.tvmaze.com/episodes/{}", id),
        }
    }

    #[test]
    fn test_show_card_fields() {
        let card = ShowCard::new(&show(1, "Archer"), SummaryMode::Plain);
        assert_eq!(card.genres, "Drama, Thriller");
        assert_eq!(card.status, "Running");
        assert_eq!(card.rating, "7.5");
        assert_eq!(card.runtime, "42 mins");
        assert_eq!(card.summary, "A tense drama.");
        assert_eq!(card.image, "");
    }

    #[test]
    fn test_show_card_placeholders() {
        let mut s = show(1, "Archer");
        s.status = None;
        s.rating = None;
        s.runtime = None;
        let card = ShowCard::new(&s, SummaryMode::Raw);
        assert_eq!(card.status, "N/A");
        assert_eq!(card.rating, "N/A");
        assert_eq!(card.runtime, "? mins");
        assert_eq!(card.summary, "<p>A tense drama.</p>");
    }

    #[test]
    fn test_episode_card() {
        let card = EpisodeCard::new(&episode(10, 3, "Pilot"), SummaryMode::Plain);
        assert_eq!(card.heading, "S01E03 - Pilot");
        assert_eq!(card.summary, "");
        assert_eq!(card.link, "View on TVMaze: https://www.tvmaze.com/episodes/10");
    }

    #[test]
    fn test_show_options_sorted_case_insensitively() {
        let shows = vec![show(1, "arrow"), show(2, "Zoo"), show(3, "Archer")];
        let labels: Vec<String> = show_options(&shows).into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["Select a show...", "Archer", "arrow", "Zoo"]);
        assert_eq!(show_options(&shows)[0].0, None);
    }

    #[test]
    fn test_episode_options() {
        let episodes = vec![episode(10, 1, "Pilot"), episode(11, 2, "Second")];
        let options = episode_options(&episodes);
        assert_eq!(options.len(), 3);
        assert_eq!(options[0], (Some(Selection::All), "All episodes".to_string()));
        assert_eq!(options[2].0, Some(Selection::Episode(EpisodeId(11))));
        assert_eq!(options[2].1, "S01E02 - Second");
    }

    #[test]
    fn test_episode_options_empty() {
        assert_eq!(episode_options(&[]), vec![(None, "No episodes".to_string())]);
    }

    #[test]
    fn test_show_count_message() {
        assert_eq!(show_count_message(1, 240), "Showing 1 / 240 shows");
    }
}
