//! Cross-surface runtime messages.

use serde::{Deserialize, Serialize};

use super::launch::{LaunchContext, LaunchMode};
use crate::tabs::TabId;

/// Where a matched binding wants to go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub url: String,
    #[serde(default)]
    pub match_keyword: String,
}

impl Destination {
    pub fn new(url: impl Into<String>, match_keyword: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            match_keyword: match_keyword.into(),
        }
    }
}

/// Message sent from the launcher surface to the background context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RuntimeMessage {
    NavigateOrSwitch {
        url: String,
        #[serde(default)]
        match_keyword: String,
        #[serde(default)]
        mode: LaunchMode,
        #[serde(default)]
        prev_url: String,
    },
}

impl RuntimeMessage {
    pub fn navigate_or_switch(destination: Destination, ctx: &LaunchContext) -> Self {
        RuntimeMessage::NavigateOrSwitch {
            url: destination.url,
            match_keyword: destination.match_keyword,
            mode: ctx.mode,
            prev_url: ctx.previous_url.clone(),
        }
    }

    /// Split into the dispatcher's inputs; the sender tab becomes the origin.
    pub fn into_parts(self, sender: Option<TabId>) -> (Destination, LaunchContext) {
        match self {
            RuntimeMessage::NavigateOrSwitch {
                url,
                match_keyword,
                mode,
                prev_url,
            } => (
                Destination { url, match_keyword },
                LaunchContext {
                    mode,
                    origin_tab_id: sender,
                    previous_url: prev_url,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let msg = RuntimeMessage::navigate_or_switch(
            Destination::new("https://x", "https://x"),
            &LaunchContext::current_tab("https://prev"),
        );
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "action": "navigateOrSwitch",
                "url": "https://x",
                "matchKeyword": "https://x",
                "mode": "current",
                "prevUrl": "https://prev"
            })
        );
    }

    #[test]
    fn test_parse_minimal_message() {
        let msg: RuntimeMessage =
            serde_json::from_str(r#"{"action":"navigateOrSwitch","url":"https://y"}"#).unwrap();
        let (dest, ctx) = msg.into_parts(Some(TabId::new("7")));
        assert_eq!(dest.url, "https://y");
        assert_eq!(dest.match_keyword, "");
        assert_eq!(ctx.mode, LaunchMode::New);
        assert_eq!(ctx.origin_tab_id, Some(TabId::new("7")));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result = serde_json::from_str::<RuntimeMessage>(r#"{"action":"explode"}"#);
        assert!(result.is_err());
    }
}
