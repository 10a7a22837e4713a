//! Custom error types for show-browser.
//!
//! Fetch failures are kept apart from the rest so the episode cache and the
//! catalog client can share one small error kind.

use std::error::Error;
use std::fmt;
use std::io;

/// A catalog request that did not produce a usable list.
#[derive(Debug)]
pub enum FetchError {
    /// The server answered with a non-success status code
    Status { url: String, status: u16 },
    /// The request never completed (DNS, connect, timeout, ...)
    Transport(String),
    /// The body could not be decoded as the expected JSON
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status { url, status } => write!(f, "HTTP error {} from {}", status, url),
            FetchError::Transport(msg) => write!(f, "Network error: {}", msg),
            FetchError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Application error types.
#[derive(Debug)]
pub enum AppError {
    /// A catalog request failed
    Fetch(FetchError),
    /// Configuration errors
    Config(String),
    /// File and terminal I/O errors
    Io(io::Error),
    /// A lookup in already-loaded data came up empty
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Fetch(err) => write!(f, "{}", err),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Fetch(err) => Some(err),
            AppError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Fetch(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
