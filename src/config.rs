//! Configuration file support for show-browser.
//!
//! Preferences are read from an optional TOML file. The file is never
//! written; a missing file simply means defaults.

use crate::api::DEFAULT_API_URL;
use crate::error::{AppError, Result};
use crossterm::event::{KeyCode, KeyEvent};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// User configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the catalog API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Show to open right after the show list has loaded
    #[serde(default)]
    pub initial_show: Option<u64>,

    /// Render summaries as plain text instead of raw markup
    #[serde(default = "default_plain_summaries")]
    pub plain_summaries: bool,

    /// Key bindings
    #[serde(default)]
    pub keybindings: Keybindings,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_plain_summaries() -> bool {
    true
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            initial_show: None,
            plain_summaries: default_plain_summaries(),
            keybindings: Keybindings::default(),
        }
    }

    /// Get the path to the config file.
    ///
    /// Returns ~/.config/show-browser/config.toml on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn get_config_path() -> std::result::Result<PathBuf, io::Error> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join("show-browser");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load config from `path`, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.timeout_secs == 0 {
            return Err(AppError::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(config)
    }
}

/// Key names per action. Single characters match exactly; named keys
/// (`enter`, `esc`, `backspace`, `tab`, `up`, `down`, `left`, `right`) match
/// case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub quit: Vec<String>,
    pub help: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub select: Vec<String>,
    pub back: Vec<String>,
    pub filter: Vec<String>,
    pub show_picker: Vec<String>,
    pub episode_picker: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            quit: keys(&["q"]),
            help: keys(&["?"]),
            up: keys(&["k", "up"]),
            down: keys(&["j", "down"]),
            select: keys(&["enter"]),
            back: keys(&["esc", "backspace"]),
            filter: keys(&["/"]),
            show_picker: keys(&["s"]),
            episode_picker: keys(&["e"]),
        }
    }
}

impl Keybindings {
    /// Whether `key` is one of the keys in `binding`.
    pub fn matches(&self, binding: &[String], key: &KeyEvent) -> bool {
        binding.iter().any(|name| key_matches(name, key))
    }
}

fn key_matches(name: &str, key: &KeyEvent) -> bool {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return key.code == KeyCode::Char(c);
    }

    let expected = match name.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        _ => return false,
    };
    key.code == expected
}
