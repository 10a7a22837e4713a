//! Filtering of the show list and of a show's episode list.
//!
//! Matching is plain case-insensitive substring containment of the query as
//! typed, whitespace included. Nothing is ranked; results keep the input order.

use crate::error::AppError;
use crate::types::{Episode, EpisodeId, Show};

/// The episode picker's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every episode, narrowed by the text query
    #[default]
    All,
    /// Exactly one episode; the text query is ignored
    Episode(EpisodeId),
}

/// Lowercased form of a user query.
fn needle(query: &str) -> String {
    query.to_lowercase()
}

fn contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

fn episode_matches(episode: &Episode, needle: &str) -> bool {
    contains(&episode.name, needle) || contains(episode.summary.as_deref().unwrap_or(""), needle)
}

fn show_matches(show: &Show, needle: &str) -> bool {
    contains(&show.name, needle)
        || contains(&show.genres.join(" "), needle)
        || contains(show.summary.as_deref().unwrap_or(""), needle)
}

/// Compute the visible subset of `episodes`.
///
/// A specific selection wins over the query. Selecting an id that is not in
/// `episodes` is reported as [`AppError::NotFound`].
pub fn visible<'a>(
    episodes: &'a [Episode],
    query: &str,
    selection: Selection,
) -> Result<Vec<&'a Episode>, AppError> {
    match selection {
        Selection::Episode(id) => episodes
            .iter()
            .find(|e| e.id == id)
            .map(|e| vec![e])
            .ok_or_else(|| AppError::NotFound(format!("episode {}", id))),
        Selection::All => {
            let needle = needle(query);
            Ok(episodes
                .iter()
                .filter(|e| episode_matches(e, &needle))
                .collect())
        }
    }
}

/// Shows whose name, genres or summary contain `query`.
pub fn visible_shows<'a>(shows: &'a [Show], query: &str) -> Vec<&'a Show> {
    let needle = needle(query);
    shows.iter().filter(|s| show_matches(s, &needle)).collect()
}
