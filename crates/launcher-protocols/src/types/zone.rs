//! Zones and grid coordinates.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::hotkey::HotkeyEntry;

/// Side length of the zone grid.
pub const GRID_SIZE: u8 = 3;

/// Cell of the zone grid, serialized as `"x-y"`.
///
/// Ordered row-major: all of row 0 before row 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneCoordinate {
    x: u8,
    y: u8,
}

impl ZoneCoordinate {
    /// The permanent default zone.
    pub const ORIGIN: ZoneCoordinate = ZoneCoordinate { x: 0, y: 0 };

    /// Build a coordinate, or `None` outside the grid.
    pub fn new(x: u8, y: u8) -> Option<Self> {
        (x < GRID_SIZE && y < GRID_SIZE).then_some(Self { x, y })
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }

    /// Left and upper neighbors that exist on the grid.
    pub fn upstream(&self) -> impl Iterator<Item = ZoneCoordinate> {
        let left = self.x.checked_sub(1).and_then(|x| Self::new(x, self.y));
        let up = self.y.checked_sub(1).and_then(|y| Self::new(self.x, y));
        left.into_iter().chain(up)
    }

    /// Right and lower neighbors that exist on the grid.
    pub fn downstream(&self) -> impl Iterator<Item = ZoneCoordinate> {
        let right = Self::new(self.x + 1, self.y);
        let down = Self::new(self.x, self.y + 1);
        right.into_iter().chain(down)
    }

    /// Every cell of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = ZoneCoordinate> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| ZoneCoordinate { x, y }))
    }
}

impl Default for ZoneCoordinate {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Ord for ZoneCoordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for ZoneCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ZoneCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

/// Failure to parse a `"x-y"` zone id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneIdError(pub String);

impl fmt::Display for ZoneIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid zone id: {}", self.0)
    }
}

impl std::error::Error for ZoneIdError {}

impl FromStr for ZoneCoordinate {
    type Err = ZoneIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once('-').ok_or_else(|| ZoneIdError(s.to_string()))?;
        let x: u8 = x.parse().map_err(|_| ZoneIdError(s.to_string()))?;
        let y: u8 = y.parse().map_err(|_| ZoneIdError(s.to_string()))?;
        Self::new(x, y).ok_or_else(|| ZoneIdError(s.to_string()))
    }
}

impl TryFrom<String> for ZoneCoordinate {
    type Error = ZoneIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZoneCoordinate> for String {
    fn from(value: ZoneCoordinate) -> Self {
        value.to_string()
    }
}

/// A named group of bindings occupying one grid cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Zone {
    /// Raw display name; may be empty.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub hotkeys: Vec<HotkeyEntry>,
}

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hotkeys: Vec::new(),
        }
    }

    pub fn with_hotkeys(name: impl Into<String>, hotkeys: Vec<HotkeyEntry>) -> Self {
        Self {
            name: name.into(),
            hotkeys,
        }
    }

    /// Name shown for the zone, falling back to a label derived from its cell.
    pub fn display_name(&self, id: ZoneCoordinate) -> String {
        if !self.name.is_empty() {
            self.name.clone()
        } else {
            default_zone_label(id)
        }
    }
}

/// Fallback label for an unnamed zone.
pub fn default_zone_label(id: ZoneCoordinate) -> String {
    if id.is_origin() {
        "Default".to_string()
    } else {
        format!("Zone {}", id)
    }
}

#[cfg(test)]
#[path = "zone_tests.rs"]
mod tests;
