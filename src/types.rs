//! Type definitions for the show-browser application.
//!
//! Shows and episodes arrive from the catalog in a loose JSON shape (nested
//! `rating`/`image` objects, nullable fields). The `Raw*` structs mirror that
//! shape and are converted into the flat [`Show`] and [`Episode`] types the
//! rest of the crate works with.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(pub u64);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog identifier of an episode, unique within its show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(pub u64);

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawRating {
    pub average: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RawImage {
    pub medium: Option<String>,
}

/// Raw show data as returned from the `/shows` endpoint.
#[derive(Debug, Deserialize)]
pub struct RawShow {
    pub id: ShowId,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub status: Option<String>,
    pub rating: Option<RawRating>,
    pub runtime: Option<u32>,
    pub summary: Option<String>,
    pub image: Option<RawImage>,
}

/// Raw episode data as returned from the `/shows/{id}/episodes` endpoint.
///
/// Specials come back with a `null` number and some episodes have no name yet.
#[derive(Debug, Deserialize)]
pub struct RawEpisode {
    pub id: EpisodeId,
    pub season: u32,
    pub number: Option<u32>,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub image: Option<RawImage>,
    pub url: Option<String>,
}

/// A TV show in the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Show {
    /// Unique identifier for the show.
    pub id: ShowId,

    /// Display name of the show.
    pub name: String,

    /// Genre names, in catalog order.
    pub genres: Vec<String>,

    /// Airing status (e.g. "Running", "Ended").
    pub status: Option<String>,

    /// Average user rating.
    pub rating: Option<f64>,

    /// Typical runtime in minutes.
    pub runtime: Option<u32>,

    /// Summary text, may contain HTML markup.
    pub summary: Option<String>,

    /// URL of the medium-sized poster.
    pub image: Option<String>,
}

impl Show {
    /// Genres joined for display.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::types::{Show, ShowId};
    ///
    /// let show = Show {
    ///     id: ShowId(1),
    ///     name: "Archer".to_string(),
    ///     genres: vec!["Comedy".to_string(), "Action".to_string()],
    ///     status: None,
    ///     rating: None,
    ///     runtime: None,
    ///     summary: None,
    ///     image: None,
    /// };
    /// assert_eq!(show.genre_list(), "Comedy, Action");
    /// ```
    pub fn genre_list(&self) -> String {
        self.genres.join(", ")
    }
}

impl From<RawShow> for Show {
    fn from(raw: RawShow) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            genres: raw.genres,
            status: raw.status,
            rating: raw.rating.and_then(|r| r.average),
            runtime: raw.runtime,
            summary: raw.summary,
            image: raw.image.and_then(|i| i.medium),
        }
    }
}

/// An episode of a show.
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    /// Unique identifier for the episode.
    pub id: EpisodeId,

    /// Season number.
    pub season: u32,

    /// Episode number within the season (0 for specials).
    pub number: u32,

    /// Episode title.
    pub name: String,

    /// Summary text, may contain HTML markup.
    pub summary: Option<String>,

    /// URL of the medium-sized still.
    pub image: Option<String>,

    /// Link to the episode page on the catalog site.
    pub url: String,
}

impl Episode {
    /// Season/number code, zero padded.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::types::{Episode, EpisodeId};
    ///
    /// let ep = Episode {
    ///     id: EpisodeId(1),
    ///     season: 1,
    ///     number: 5,
    ///     name: "Pilot".to_string(),
    ///     summary: None,
    ///     image: None,
    ///     url: String::new(),
    /// };
    /// assert_eq!(ep.code(), "S01E05");
    /// assert_eq!(ep.to_display(), "S01E05 - Pilot");
    /// ```
    pub fn code(&self) -> String {
        format!("S{:02}E{:02}", self.season, self.number)
    }

    /// Format the episode for display in lists and pickers.
    pub fn to_display(&self) -> String {
        format!("{} - {}", self.code(), self.name)
    }
}

impl From<RawEpisode> for Episode {
    fn from(raw: RawEpisode) -> Self {
        Self {
            id: raw.id,
            season: raw.season,
            number: raw.number.unwrap_or(0),
            name: raw.name.unwrap_or_default(),
            summary: raw.summary,
            image: raw.image.and_then(|i| i.medium),
            url: raw.url.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_show_conversion() {
        let json = r#"{
            "id": 82,
            "name": "Game of Thrones",
            "genres": ["Drama", "Adventure", "Fantasy"],
            "status": "Ended",
            "rating": {"average": 8.9},
            "runtime": 60,
            "summary": "<p>Based on the bestselling book series.</p>",
            "image": {"medium": "https://static.tvmaze.com/got.jpg", "original": "x"},
            "language": "English"
        }"#;

        let raw: RawShow = serde_json::from_str(json).unwrap();
        let show = Show::from(raw);
        assert_eq!(show.id, ShowId(82));
        assert_eq!(show.genre_list(), "Drama, Adventure, Fantasy");
        assert_eq!(show.rating, Some(8.9));
        assert_eq!(show.runtime, Some(60));
        assert_eq!(show.image.as_deref(), Some("https://static.tvmaze.com/got.jpg"));
    }

    #[test]
    fn test_raw_show_with_nulls() {
        let json = r#"{
            "id": 7,
            "name": "Obscure",
            "genres": [],
            "status": null,
            "rating": {"average": null},
            "runtime": null,
            "summary": null,
            "image": null
        }"#;

        let show = Show::from(serde_json::from_str::<RawShow>(json).unwrap());
        assert_eq!(show.rating, None);
        assert_eq!(show.runtime, None);
        assert_eq!(show.image, None);
        assert_eq!(show.genre_list(), "");
    }

    #[test]
    fn test_raw_episode_special() {
        let json = r#"{
            "id": 4952,
            "season": 2,
            "number": null,
            "name": null,
            "summary": null,
            "image": null,
            "url": "https://www.tvmaze.com/episodes/4952"
        }"#;

        let ep = Episode::from(serde_json::from_str::<RawEpisode>(json).unwrap());
        assert_eq!(ep.code(), "S02E00");
        assert_eq!(ep.name, "");
        assert_eq!(ep.url, "https://www.tvmaze.com/episodes/4952");
    }

    #[test]
    fn test_episode_to_display_double_digits() {
        let ep = Episode {
            id: EpisodeId(3),
            season: 12,
            number: 24,
            name: "Finale".to_string(),
            summary: None,
            image: None,
            url: String::new(),
        };
        assert_eq!(ep.to_display(), "S12E24 - Finale");
    }

    #[test]
    fn test_ids_display_as_numbers() {
        assert_eq!(ShowId(82).to_string(), "82");
        assert_eq!(EpisodeId(4952).to_string(), "4952");
    }
}
