//! Hotkey registry.
//!
//! [`Registry`] is the pure zone map with its mutation rules;
//! [`PersistentRegistry`] wraps it with load/migrate/persist against a
//! [`SyncStore`](launcher_protocols::SyncStore).

mod error;
mod model;
mod persistent;

pub use error::RegistryError;
pub use model::Registry;
pub use persistent::{LEGACY_HOTKEYS_KEY, PersistentRegistry, ZONES_KEY};
