//! Terminal user interface for show-browser using ratatui.
//!
//! A full-screen listing of shows or episodes with a details pane, a
//! filter bar and popup pickers.

mod render;
mod state;
mod types;

pub use render::draw;
pub use state::App;
pub use types::{Action, Overlay};

use crossterm::event::{self, Event};
use std::io;
use std::time::Duration;

/// Poll for keyboard events with a timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
