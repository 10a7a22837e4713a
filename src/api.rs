//! API client for the TVMaze catalog.
//!
//! Two read-only endpoints are used: the full show list and the episode list
//! of one show. Each call is a single request with no retries; any failure is
//! reported as a [`FetchError`] and left to the caller to surface.

use crate::error::FetchError;
use crate::types::{Episode, RawEpisode, RawShow, Show, ShowId};
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default catalog root.
pub const DEFAULT_API_URL: &str = "https://api.tvmaze.com";

const USER_AGENT: &str = concat!("show-browser/", env!("CARGO_PKG_VERSION"));

/// Anything that can produce the show list and per-show episode lists.
///
/// [`CatalogClient`] talks HTTP; tests plug in in-memory sources.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the complete show list.
    async fn fetch_shows(&self) -> Result<Vec<Show>, FetchError>;

    /// Fetch every episode of one show, in catalog order.
    async fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, FetchError>;
}

/// HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Build a client rooted at `base_url` (trailing slash optional).
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::api::CatalogClient;
    /// use show_browser::types::ShowId;
    /// use std::time::Duration;
    ///
    /// let client = CatalogClient::new("https://api.tvmaze.com/", Duration::from_secs(30)).unwrap();
    /// assert_eq!(client.episodes_url(ShowId(82)), "https://api.tvmaze.com/shows/82/episodes");
    /// ```
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn shows_url(&self) -> String {
        format!("{}/shows", self.base_url)
    }

    pub fn episodes_url(&self, show_id: ShowId) -> String {
        format!("{}/shows/{}/episodes", self.base_url, show_id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!("GET {}", url);

        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_shows(&self) -> Result<Vec<Show>, FetchError> {
        let raw: Vec<RawShow> = self.get_json(&self.shows_url()).await?;
        let shows: Vec<Show> = raw.into_iter().map(Show::from).collect();

        debug!("Fetched {} shows", shows.len());

        Ok(shows)
    }

    async fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, FetchError> {
        let raw: Vec<RawEpisode> = self.get_json(&self.episodes_url(show_id)).await?;
        let episodes: Vec<Episode> = raw.into_iter().map(Episode::from).collect();

        debug!("Fetched {} episodes for show {}", episodes.len(), show_id);

        Ok(episodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_shows_url() {
        assert_eq!(client(DEFAULT_API_URL).shows_url(), "https://api.tvmaze.com/shows");
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let c = client("http://localhost:8080///");
        assert_eq!(c.shows_url(), "http://localhost:8080/shows");
        assert_eq!(c.episodes_url(ShowId(5)), "http://localhost:8080/shows/5/episodes");
    }

    #[test]
    fn test_user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("show-browser/"));
    }
}
