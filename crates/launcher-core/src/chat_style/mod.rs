//! Reading preferences for AI chat pages: font sizes per text tag, chat
//! column width and an on/off switch, kept in the sync store as flat keys.
//!
//! Only the preference model lives here; turning it into page styles is up
//! to whatever consumes the stored values.

mod error;
mod model;
mod persistent;

pub use error::ChatStyleError;
pub use model::{ChatStyleSettings, FontSizes, MAX_CHAT_WIDTH, MIN_CHAT_WIDTH, Preset, TextTag};
pub use persistent::ChatStyleStore;
