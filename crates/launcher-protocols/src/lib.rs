//! # Launcher Protocols
//!
//! Shared definitions for the hotkey launcher.
//! Contains only data types and platform interfaces - no implementations.
//!
//! ## Core Traits
//!
//! - [`SyncStore`] - Synchronized key-value store holding the persisted registry
//! - [`TabHost`] - Browser tab and window operations used by the dispatcher

pub mod error;
pub mod storage;
pub mod tabs;
pub mod types;

pub use error::{StorageError, TabError};
pub use storage::SyncStore;
pub use tabs::{TabHost, TabId, TabInfo, WindowId};
pub use types::*;
