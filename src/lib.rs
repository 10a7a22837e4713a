//! A terminal browser for TV show and episode catalogs.
//!
//! show-browser loads the show catalog from a TVMaze-compatible HTTP API,
//! lets the user filter it by name, genre or summary, and lists a show's
//! episodes once it is selected. Episode lists are cached per show for
//! the lifetime of the process.
//!
//! # Usage
//!
//! ```bash
//! # Browse the public catalog
//! cargo run
//!
//! # Open a specific show straight away
//! cargo run -- --show 82
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod session;
pub mod tui;
pub mod types;
pub mod view;
