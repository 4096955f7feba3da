//! The launcher application: registry, launch context and interaction mode.

use std::sync::Arc;

use tracing::debug;

use launcher_protocols::{
    Destination, EntryField, EntryId, HotkeyEntry, LaunchContext, RuntimeMessage, SyncStore,
    ZoneCoordinate,
};

use super::ui_mode::UiMode;
use crate::keys::{self, KeyPress};
use crate::layout::{self, GridLayout};
use crate::registry::{PersistentRegistry, Registry, RegistryError};

/// Result of pressing an entry's delete button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// First press: waiting for confirmation.
    Armed,
    /// Second press: the entry is gone.
    Deleted,
    /// The entry no longer exists.
    Missing,
}

/// Result of a keypress on the launcher surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing happened.
    Ignored,
    /// The key was bound to the entry being edited.
    Captured(String),
    /// Tab or Escape ended the edit session.
    CaptureEnded,
    /// A binding matched; the message goes to the background context.
    Dispatch(RuntimeMessage),
    /// No binding with a URL matched the key.
    Unbound,
}

pub struct LauncherApp {
    registry: PersistentRegistry,
    launch: LaunchContext,
    mode: UiMode,
}

impl LauncherApp {
    pub fn new(registry: PersistentRegistry, launch: LaunchContext) -> Self {
        Self {
            registry,
            launch,
            mode: UiMode::Idle,
        }
    }

    /// Load the registry from `store` and start idle.
    pub async fn open(store: Arc<dyn SyncStore>, launch: LaunchContext) -> Result<Self, RegistryError> {
        let registry = PersistentRegistry::load(store).await?;
        Ok(Self::new(registry, launch))
    }

    pub fn registry(&self) -> &Registry {
        self.registry.registry()
    }

    pub fn launch_context(&self) -> &LaunchContext {
        &self.launch
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn layout(&self) -> GridLayout {
        layout::compute_layout(self.registry())
    }

    fn set_mode(&mut self, mode: UiMode) {
        if self.mode != mode {
            debug!("UI mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Any action other than the confirming click dismisses a pending delete.
    fn dismiss_confirmation(&mut self) {
        if let UiMode::ConfirmingDelete(_) = self.mode {
            self.set_mode(UiMode::Idle);
        }
    }

    /// Back to idle when the current mode points at `id`.
    fn release_entry(&mut self, id: EntryId) {
        if self.mode.entry() == Some(id) {
            self.set_mode(UiMode::Idle);
        }
    }

    // ========================================================================
    // Entries
    // ========================================================================

    /// Append a blank entry to `zone` and start editing it.
    pub async fn add_entry(&mut self, zone: ZoneCoordinate) -> Result<Option<EntryId>, RegistryError> {
        self.dismiss_confirmation();
        let id = self.registry.add_entry(zone).await?;
        if let Some(id) = id {
            self.set_mode(UiMode::EditingEntry(id));
        }
        Ok(id)
    }

    pub fn begin_edit(&mut self, id: EntryId) -> bool {
        self.dismiss_confirmation();
        if self.registry().entry_by_id(id).is_none() {
            return false;
        }
        self.set_mode(UiMode::EditingEntry(id));
        true
    }

    pub fn finish_edit(&mut self) {
        if let UiMode::EditingEntry(_) = self.mode {
            self.set_mode(UiMode::Idle);
        }
    }

    /// Store one field of an entry. Persisted immediately.
    pub async fn commit_field(
        &mut self,
        id: EntryId,
        field: EntryField,
        value: impl Into<String>,
    ) -> Result<bool, RegistryError> {
        self.dismiss_confirmation();
        self.registry.update_entry_by_id(id, field, value).await
    }

    /// Press the delete button on an entry row.
    ///
    /// The first press arms the confirmation; a second press on the same
    /// entry deletes it.
    pub async fn request_delete(&mut self, id: EntryId) -> Result<DeleteOutcome, RegistryError> {
        if self.mode == UiMode::ConfirmingDelete(id) {
            return Ok(match self.delete_entry(id).await? {
                Some(_) => DeleteOutcome::Deleted,
                None => DeleteOutcome::Missing,
            });
        }
        if self.registry().entry_by_id(id).is_none() {
            self.dismiss_confirmation();
            return Ok(DeleteOutcome::Missing);
        }
        self.set_mode(UiMode::ConfirmingDelete(id));
        Ok(DeleteOutcome::Armed)
    }

    /// Delete without confirmation, as the edit row's delete button does.
    pub async fn delete_entry(&mut self, id: EntryId) -> Result<Option<HotkeyEntry>, RegistryError> {
        self.dismiss_confirmation();
        let removed = self.registry.remove_entry_by_id(id).await?;
        self.release_entry(id);
        Ok(removed)
    }

    // ========================================================================
    // Zone names
    // ========================================================================

    pub fn begin_rename(&mut self, zone: ZoneCoordinate) -> bool {
        self.dismiss_confirmation();
        if !self.registry().contains(zone) {
            return false;
        }
        self.set_mode(UiMode::EditingZoneName(zone));
        true
    }

    /// Commit the title being edited (Enter or blur). The raw text is stored.
    pub async fn commit_rename(&mut self, name: impl Into<String>) -> Result<bool, RegistryError> {
        let UiMode::EditingZoneName(zone) = self.mode else {
            return Ok(false);
        };
        self.set_mode(UiMode::Idle);
        self.registry.rename_zone(zone, name).await
    }

    /// Escape: leave the title unchanged.
    pub fn cancel_rename(&mut self) {
        if let UiMode::EditingZoneName(_) = self.mode {
            self.set_mode(UiMode::Idle);
        }
    }

    // ========================================================================
    // Drag and drop
    // ========================================================================

    pub fn begin_drag(&mut self, id: EntryId) -> bool {
        self.dismiss_confirmation();
        if self.registry().entry_by_id(id).is_none() {
            return false;
        }
        self.set_mode(UiMode::Dragging(id));
        true
    }

    /// Drop the dragged entry onto another entry, taking its index.
    pub async fn drop_on_entry(&mut self, target: EntryId) -> Result<bool, RegistryError> {
        let UiMode::Dragging(source) = self.mode else {
            return Ok(false);
        };
        self.set_mode(UiMode::Idle);
        if source == target {
            return Ok(false);
        }

        let registry = self.registry();
        let (Some((from_zone, from_index)), Some((to_zone, to_index))) =
            (registry.position_of(source), registry.position_of(target))
        else {
            return Ok(false);
        };
        self.registry
            .move_entry(from_zone, from_index, to_zone, Some(to_index))
            .await
    }

    /// Drop the dragged entry onto a zone body, appending it there.
    ///
    /// Dropping on the zone the entry already lives in does nothing.
    pub async fn drop_on_zone(&mut self, zone: ZoneCoordinate) -> Result<bool, RegistryError> {
        let UiMode::Dragging(source) = self.mode else {
            return Ok(false);
        };
        self.set_mode(UiMode::Idle);

        let Some((from_zone, from_index)) = self.registry().position_of(source) else {
            return Ok(false);
        };
        if from_zone == zone {
            return Ok(false);
        }
        self.registry.move_entry(from_zone, from_index, zone, None).await
    }

    /// The drag ended without a drop target.
    pub fn end_drag(&mut self) {
        if let UiMode::Dragging(_) = self.mode {
            self.set_mode(UiMode::Idle);
        }
    }

    // ========================================================================
    // Zones
    // ========================================================================

    pub async fn activate_zone(&mut self, zone: ZoneCoordinate) -> Result<bool, RegistryError> {
        self.dismiss_confirmation();
        self.registry.activate_zone(zone).await
    }

    /// Delete a zone and every entry in it.
    ///
    /// Focus pointing into the deleted zone returns to idle.
    pub async fn delete_zone(&mut self, zone: ZoneCoordinate) -> Result<bool, RegistryError> {
        self.dismiss_confirmation();
        let focused_inside = match self.mode {
            UiMode::EditingZoneName(z) => z == zone,
            mode => mode
                .entry()
                .and_then(|id| self.registry().position_of(id))
                .is_some_and(|(z, _)| z == zone),
        };

        let deleted = self.registry.deactivate_zone(zone).await?;
        if deleted && focused_inside {
            self.set_mode(UiMode::Idle);
        }
        Ok(deleted)
    }

    // ========================================================================
    // Keyboard
    // ========================================================================

    /// Route a keypress.
    ///
    /// While an entry is being edited the key is captured into it. While a
    /// zone title is being edited the key belongs to the text field.
    /// Otherwise the key is matched against the registry.
    pub async fn handle_key(&mut self, press: &KeyPress) -> Result<KeyOutcome, RegistryError> {
        match self.mode {
            UiMode::EditingEntry(id) => self.capture_key(id, press).await,
            UiMode::EditingZoneName(_) => Ok(KeyOutcome::Ignored),
            _ => Ok(self.match_key(press)),
        }
    }

    async fn capture_key(&mut self, id: EntryId, press: &KeyPress) -> Result<KeyOutcome, RegistryError> {
        if press.ends_capture() {
            self.finish_edit();
            return Ok(KeyOutcome::CaptureEnded);
        }
        let Some(binding) = keys::capture_binding(press) else {
            return Ok(KeyOutcome::Ignored);
        };
        if !self.registry.update_entry_by_id(id, EntryField::Key, binding.as_str()).await? {
            self.release_entry(id);
            return Ok(KeyOutcome::Ignored);
        }
        debug!("Captured key {} for entry {}", binding, id);
        Ok(KeyOutcome::Captured(binding))
    }

    /// A matched key dispatches and clears a pending delete confirmation.
    fn match_key(&mut self, press: &KeyPress) -> KeyOutcome {
        let key = press.normalized();
        let destination = match self.registry().find_binding(&key) {
            Some((zone, entry)) => {
                debug!("Key {} matched binding in zone {}", key, zone);
                Destination::new(entry.url.clone(), entry.match_keyword.clone())
            }
            None => return KeyOutcome::Unbound,
        };
        self.dismiss_confirmation();
        KeyOutcome::Dispatch(RuntimeMessage::navigate_or_switch(destination, &self.launch))
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
