//! Chat style value types and the built-in presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MIN_CHAT_WIDTH: u32 = 1;
pub const MAX_CHAT_WIDTH: u32 = 100;

/// Text elements whose font size is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTag {
    H1,
    H2,
    H3,
    P,
    Li,
    Pre,
    Code,
}

impl TextTag {
    pub const ALL: [TextTag; 7] = [
        TextTag::H1,
        TextTag::H2,
        TextTag::H3,
        TextTag::P,
        TextTag::Li,
        TextTag::Pre,
        TextTag::Code,
    ];

    /// Tag name, also the store key of its size.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextTag::H1 => "h1",
            TextTag::H2 => "h2",
            TextTag::H3 => "h3",
            TextTag::P => "p",
            TextTag::Li => "li",
            TextTag::Pre => "pre",
            TextTag::Code => "code",
        }
    }
}

impl fmt::Display for TextTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font size in pixels for each [`TextTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizes {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub p: u32,
    pub li: u32,
    pub pre: u32,
    pub code: u32,
}

impl FontSizes {
    pub fn get(&self, tag: TextTag) -> u32 {
        match tag {
            TextTag::H1 => self.h1,
            TextTag::H2 => self.h2,
            TextTag::H3 => self.h3,
            TextTag::P => self.p,
            TextTag::Li => self.li,
            TextTag::Pre => self.pre,
            TextTag::Code => self.code,
        }
    }

    pub fn set(&mut self, tag: TextTag, px: u32) {
        let slot = match tag {
            TextTag::H1 => &mut self.h1,
            TextTag::H2 => &mut self.h2,
            TextTag::H3 => &mut self.h3,
            TextTag::P => &mut self.p,
            TextTag::Li => &mut self.li,
            TextTag::Pre => &mut self.pre,
            TextTag::Code => &mut self.code,
        };
        *slot = px;
    }
}

impl Default for FontSizes {
    fn default() -> Self {
        Preset::Small.sizes()
    }
}

/// Named font size sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    XSmall,
    Small,
    Large,
}

impl Preset {
    pub fn sizes(&self) -> FontSizes {
        match self {
            Preset::XSmall => FontSizes {
                h1: 18,
                h2: 15,
                h3: 13,
                p: 11,
                li: 11,
                pre: 10,
                code: 10,
            },
            Preset::Small => FontSizes {
                h1: 22,
                h2: 18,
                h3: 15,
                p: 13,
                li: 13,
                pre: 12,
                code: 12,
            },
            Preset::Large => FontSizes {
                h1: 32,
                h2: 26,
                h3: 22,
                p: 18,
                li: 18,
                pre: 16,
                code: 16,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::XSmall => "xsmall",
            Preset::Small => "small",
            Preset::Large => "large",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xsmall" => Ok(Preset::XSmall),
            "small" => Ok(Preset::Small),
            "large" => Ok(Preset::Large),
            other => Err(format!("unknown preset: {} (expected xsmall, small or large)", other)),
        }
    }
}

/// Everything the chat page styling reads.
///
/// Stored flat: `enabled`, `chatWidth` and one key per tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStyleSettings {
    pub enabled: bool,
    /// Chat column width in percent.
    pub chat_width: u32,
    #[serde(flatten)]
    pub sizes: FontSizes,
}

impl ChatStyleSettings {
    pub const ENABLED_KEY: &'static str = "enabled";
    pub const CHAT_WIDTH_KEY: &'static str = "chatWidth";

    /// Every store key the settings occupy.
    pub fn keys() -> Vec<&'static str> {
        let mut keys = vec![Self::ENABLED_KEY, Self::CHAT_WIDTH_KEY];
        keys.extend(TextTag::ALL.iter().map(|tag| tag.as_str()));
        keys
    }
}

impl Default for ChatStyleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            chat_width: MAX_CHAT_WIDTH,
            sizes: FontSizes::default(),
        }
    }
}
