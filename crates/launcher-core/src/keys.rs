//! Key normalization.
//!
//! Capture and live matching must produce byte-identical identifiers, so
//! both go through [`normalize`].

use std::fmt;

/// Name of the Shift key as reported by the platform.
pub const SHIFT: &str = "Shift";
/// Token used for the space bar.
pub const SPACE: &str = "Space";
/// Prefix added when Shift is held with another key.
pub const SHIFT_PREFIX: &str = "Shift+";

/// Keys that end a capture session instead of being bound.
const CAPTURE_TERMINATORS: [&str; 2] = ["Tab", "Escape"];

/// Convert a raw key name into its canonical identifier.
pub fn normalize(raw_key: &str, shift_held: bool) -> String {
    let mut chars = raw_key.chars();
    let base = match (chars.next(), chars.next()) {
        (Some(' '), None) => SPACE.to_string(),
        (Some(c), None) => c.to_uppercase().collect(),
        _ => raw_key.to_string(),
    };

    if shift_held && raw_key != SHIFT {
        format!("{}{}", SHIFT_PREFIX, base)
    } else {
        base
    }
}

/// A raw keypress as delivered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, shift: bool) -> Self {
        Self {
            key: key.into(),
            shift,
        }
    }

    pub fn normalized(&self) -> String {
        normalize(&self.key, self.shift)
    }

    pub fn is_shift_only(&self) -> bool {
        self.key == SHIFT
    }

    /// Whether this key ends a capture session.
    pub fn ends_capture(&self) -> bool {
        CAPTURE_TERMINATORS.contains(&self.key.as_str())
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}

/// The binding a keypress would produce during capture.
///
/// Shift on its own never becomes a binding.
pub fn capture_binding(press: &KeyPress) -> Option<String> {
    if press.is_shift_only() {
        None
    } else {
        Some(press.normalized())
    }
}
