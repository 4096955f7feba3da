//! Data types shared across the launcher.

mod hotkey;
mod launch;
mod message;
mod zone;

pub use hotkey::*;
pub use launch::*;
pub use message::*;
pub use zone::*;
