//! Hotkey entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identity of an entry for the lifetime of a loaded registry.
///
/// Never persisted: a fresh id is minted whenever an entry is created or
/// loaded, so transient UI focus can follow an entry across reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single key binding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotkeyEntry {
    #[serde(skip)]
    pub id: EntryId,

    /// Canonical key identifier, empty while unbound.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub key: String,

    /// Navigation target, possibly empty.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub url: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,

    /// URL prefix identifying an already-open tab for this destination.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub match_keyword: String,
}

impl HotkeyEntry {
    /// A blank entry awaiting key capture.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_match_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.match_keyword = keyword.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_bound(&self) -> bool {
        !self.key.is_empty()
    }

    /// Key shown on the entry's badge, `?` when unbound.
    pub fn key_badge(&self) -> &str {
        if self.is_bound() { &self.key } else { "?" }
    }

    /// Text shown for the entry in list view.
    pub fn display_text(&self) -> &str {
        if !self.description.is_empty() {
            &self.description
        } else if !self.url.is_empty() {
            &self.url
        } else {
            "(unset)"
        }
    }

    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::Key => &self.key,
            EntryField::Url => &self.url,
            EntryField::Description => &self.description,
            EntryField::MatchKeyword => &self.match_keyword,
        }
    }

    pub fn set_field(&mut self, field: EntryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EntryField::Key => self.key = value,
            EntryField::Url => self.url = value,
            EntryField::Description => self.description = value,
            EntryField::MatchKeyword => self.match_keyword = value,
        }
    }
}

/// Editable fields of a [`HotkeyEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Key,
    Url,
    Description,
    MatchKeyword,
}

impl EntryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::Key => "key",
            EntryField::Url => "url",
            EntryField::Description => "description",
            EntryField::MatchKeyword => "matchKeyword",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "key" => Ok(EntryField::Key),
            "url" => Ok(EntryField::Url),
            "description" | "desc" => Ok(EntryField::Description),
            "matchKeyword" | "match_keyword" | "match" => Ok(EntryField::MatchKeyword),
            other => Err(format!("unknown entry field: {}", other)),
        }
    }
}

/// Stored entries may carry `null` for fields that were never filled in.
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_entry() {
        let entry: HotkeyEntry =
            serde_json::from_str(r#"{"key":"A","url":"http://x"}"#).unwrap();
        assert_eq!(entry.key, "A");
        assert_eq!(entry.url, "http://x");
        assert_eq!(entry.description, "");
        assert_eq!(entry.match_keyword, "");
    }

    #[test]
    fn test_deserialize_null_fields() {
        let entry: HotkeyEntry =
            serde_json::from_str(r#"{"key":"B","url":null,"matchKeyword":null}"#).unwrap();
        assert_eq!(entry.url, "");
        assert_eq!(entry.match_keyword, "");
    }

    #[test]
    fn test_serialize_omits_id() {
        let entry = HotkeyEntry::new("M", "https://mail.example.com")
            .with_match_keyword("https://mail.example.com");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "key": "M",
                "url": "https://mail.example.com",
                "description": "",
                "matchKeyword": "https://mail.example.com"
            })
        );
    }

    #[test]
    fn test_loaded_entries_get_distinct_ids() {
        let a: HotkeyEntry = serde_json::from_str(r#"{"key":"A"}"#).unwrap();
        let b: HotkeyEntry = serde_json::from_str(r#"{"key":"A"}"#).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_display_text_fallbacks() {
        let mut entry = HotkeyEntry::blank();
        assert_eq!(entry.display_text(), "(unset)");
        entry.url = "https://x".to_string();
        assert_eq!(entry.display_text(), "https://x");
        entry.description = "X".to_string();
        assert_eq!(entry.display_text(), "X");
    }

    #[test]
    fn test_key_badge() {
        let mut entry = HotkeyEntry::blank();
        assert!(!entry.is_bound());
        assert_eq!(entry.key_badge(), "?");
        entry.key = "Shift+G".to_string();
        assert_eq!(entry.key_badge(), "Shift+G");
    }

    #[test]
    fn test_entry_field_parse() {
        assert_eq!("matchKeyword".parse::<EntryField>(), Ok(EntryField::MatchKeyword));
        assert_eq!("desc".parse::<EntryField>(), Ok(EntryField::Description));
        assert!("color".parse::<EntryField>().is_err());
    }

    #[test]
    fn test_set_field() {
        let mut entry = HotkeyEntry::blank();
        entry.set_field(EntryField::Url, "not a url at all");
        assert_eq!(entry.field(EntryField::Url), "not a url at all");
    }
}
