//! # Launcher Dispatch
//!
//! Everything that touches browser tabs:
//!
//! - [`Dispatcher`] - switch to an already-open tab or navigate the launcher tab
//! - [`TriggerRouter`] - open the launcher surface from the icon or a shortcut

pub mod background;
pub mod dispatcher;

pub use background::{LauncherTrigger, OPEN_LAUNCHER, OPEN_LAUNCHER_CURRENT, TriggerOutcome, TriggerRouter};
pub use dispatcher::{DispatchOutcome, Dispatcher, LauncherDisposition};

#[cfg(test)]
pub(crate) mod testing;
