//! TUI type definitions for overlays and actions.

use crate::session::Command;

/// Popup drawn over the listing, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    /// Alphabetical show dropdown
    ShowPicker,
    /// "All episodes" plus one entry per episode
    EpisodePicker,
}

/// Actions that can be returned from the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Hand a command to the loader
    Dispatch(Command),
}
