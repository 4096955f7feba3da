//! # Launcher Core
//!
//! The launcher's in-process model:
//!
//! - [`chat_style`] - reading preferences for AI chat pages
//! - [`keys`] - canonical key identifiers shared by capture and matching
//! - [`registry`] - zones of hotkey entries and their persistence
//! - [`topology`] - which grid cells may be activated or deleted
//! - [`layout`] - grid sizing derived from the topology
//! - [`state`] - the launcher application state machine

pub mod chat_style;
pub mod keys;
pub mod layout;
pub mod registry;
pub mod state;
pub mod topology;

pub use chat_style::{ChatStyleSettings, ChatStyleStore, Preset};
pub use keys::{KeyPress, normalize};
pub use layout::{Band, CellKind, GridCell, GridLayout, compute_layout};
pub use registry::{PersistentRegistry, Registry, RegistryError};
pub use state::{DeleteOutcome, KeyOutcome, LauncherApp, UiMode};
pub use topology::{can_activate, can_deactivate};
