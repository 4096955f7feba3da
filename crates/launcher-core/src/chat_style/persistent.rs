//! Chat style settings over the sync store.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use launcher_protocols::SyncStore;

use super::error::ChatStyleError;
use super::model::{ChatStyleSettings, FontSizes, MAX_CHAT_WIDTH, MIN_CHAT_WIDTH, Preset};

/// Reads settings with defaults filled in and writes every change straight
/// back to the store.
pub struct ChatStyleStore {
    store: Arc<dyn SyncStore>,
}

impl ChatStyleStore {
    pub fn new(store: Arc<dyn SyncStore>) -> Self {
        Self { store }
    }

    /// Stored values over the defaults.
    ///
    /// A key that is missing, has the wrong type or an out-of-range width
    /// keeps its default.
    pub async fn load(&self) -> Result<ChatStyleSettings, ChatStyleError> {
        let stored = self.store.get(&ChatStyleSettings::keys()).await?;
        let mut merged = to_items(&ChatStyleSettings::default())?;

        for (key, value) in stored {
            if fits(&key, merged.get(key.as_str()), &value) {
                merged.insert(key, value);
            } else {
                warn!("Ignoring stored chat style value {}={}", key, value);
            }
        }

        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    pub async fn set_enabled(&self, enabled: bool) -> Result<ChatStyleSettings, ChatStyleError> {
        let mut settings = self.load().await?;
        settings.enabled = enabled;
        self.write(&settings).await?;
        Ok(settings)
    }

    /// Width is clamped to 1..=100 percent.
    pub async fn set_chat_width(&self, percent: u32) -> Result<ChatStyleSettings, ChatStyleError> {
        let mut settings = self.load().await?;
        settings.chat_width = percent.clamp(MIN_CHAT_WIDTH, MAX_CHAT_WIDTH);
        self.write(&settings).await?;
        Ok(settings)
    }

    pub async fn apply_font_sizes(&self, sizes: FontSizes) -> Result<ChatStyleSettings, ChatStyleError> {
        let mut settings = self.load().await?;
        settings.sizes = sizes;
        self.write(&settings).await?;
        Ok(settings)
    }

    /// Write the preset's sizes and the current enabled flag; the chat
    /// width is left as stored.
    pub async fn apply_preset(&self, preset: Preset) -> Result<ChatStyleSettings, ChatStyleError> {
        let mut settings = self.load().await?;
        settings.sizes = preset.sizes();

        let mut items = to_items(&settings.sizes)?;
        items.insert(ChatStyleSettings::ENABLED_KEY.to_string(), Value::Bool(settings.enabled));
        self.store.set(items).await?;
        debug!("Applied chat style preset {}", preset);
        Ok(settings)
    }

    async fn write(&self, settings: &ChatStyleSettings) -> Result<(), ChatStyleError> {
        self.store.set(to_items(settings)?).await?;
        debug!("Saved chat style settings: {:?}", settings);
        Ok(())
    }
}

/// Whether a stored value can replace the default held for `key`.
fn fits(key: &str, default: Option<&Value>, value: &Value) -> bool {
    match default {
        Some(Value::Bool(_)) => value.is_boolean(),
        Some(Value::Number(_)) => {
            let Some(n) = value.as_u64() else {
                return false;
            };
            if key == ChatStyleSettings::CHAT_WIDTH_KEY {
                (u64::from(MIN_CHAT_WIDTH)..=u64::from(MAX_CHAT_WIDTH)).contains(&n)
            } else {
                n > 0 && n <= u64::from(u32::MAX)
            }
        }
        _ => false,
    }
}

fn to_items<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>, ChatStyleError> {
    match serde_json::to_value(value)? {
        Value::Object(items) => Ok(items),
        other => Err(ChatStyleError::Serialization(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
#[path = "persistent_tests.rs"]
mod tests;
