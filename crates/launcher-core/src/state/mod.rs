//! Launcher application state.
//!
//! One [`LauncherApp`] owns the registry, the launch context and exactly one
//! [`UiMode`]. Focus is tracked by [`EntryId`](launcher_protocols::EntryId),
//! so it follows an entry through reorders and removals of its neighbors.

mod app;
mod ui_mode;

pub use app::{DeleteOutcome, KeyOutcome, LauncherApp};
pub use ui_mode::UiMode;
