//! Store-backed registry: load, one-time migration, persist-after-mutation.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use launcher_protocols::{EntryField, EntryId, HotkeyEntry, SyncStore, Zone, ZoneCoordinate};

use super::error::RegistryError;
use super::model::Registry;

/// Store key of the zone-keyed schema.
pub const ZONES_KEY: &str = "zones";
/// Store key of the legacy flat list.
pub const LEGACY_HOTKEYS_KEY: &str = "hotkeys";

/// A [`Registry`] that writes itself back after every mutation.
///
/// There is no batching and no conflict detection: the last writer wins.
/// A mutation whose write fails is rolled back, so memory never runs ahead
/// of the store.
pub struct PersistentRegistry {
    store: Arc<dyn SyncStore>,
    registry: Registry,
}

impl PersistentRegistry {
    /// Load from the store.
    ///
    /// Zone-keyed data wins over the legacy list. Legacy data is migrated
    /// into the origin zone and written back immediately. Malformed values
    /// are treated as absent.
    pub async fn load(store: Arc<dyn SyncStore>) -> Result<Self, RegistryError> {
        let stored = store.get(&[ZONES_KEY, LEGACY_HOTKEYS_KEY]).await?;

        if let Some(value) = stored.get(ZONES_KEY).filter(|v| !v.is_null()) {
            match decode_zones(value) {
                Some(zones) => {
                    debug!("Loaded {} zones", zones.len());
                    return Ok(Self {
                        store,
                        registry: Registry::from_zones(zones),
                    });
                }
                None => warn!("Stored zones are malformed, ignoring them"),
            }
        }

        if let Some(value) = stored.get(LEGACY_HOTKEYS_KEY).filter(|v| !v.is_null()) {
            match serde_json::from_value::<Vec<HotkeyEntry>>(value.clone()) {
                Ok(hotkeys) => {
                    info!("Migrating {} legacy hotkeys into zone 0-0", hotkeys.len());
                    let this = Self {
                        store,
                        registry: Registry::from_legacy(hotkeys),
                    };
                    this.persist().await?;
                    return Ok(this);
                }
                Err(e) => warn!("Stored legacy hotkeys are malformed, ignoring them: {}", e),
            }
        }

        debug!("No stored hotkeys, starting with an empty default zone");
        Ok(Self {
            store,
            registry: Registry::new(),
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Write the full registry in the zone-keyed schema.
    pub async fn persist(&self) -> Result<(), RegistryError> {
        let mut items = Map::new();
        items.insert(ZONES_KEY.to_string(), self.registry.to_stored()?);
        self.store.set(items).await?;
        debug!("Persisted {} zones", self.registry.zone_count());
        Ok(())
    }

    /// Persist a mutation, restoring `previous` if the write fails.
    async fn commit(&mut self, previous: Registry, changed: bool) -> Result<bool, RegistryError> {
        if !changed {
            return Ok(false);
        }
        if let Err(e) = self.persist().await {
            warn!("Persist failed, rolling back the change: {}", e);
            self.registry = previous;
            return Err(e);
        }
        Ok(true)
    }

    pub async fn add_entry(&mut self, zone: ZoneCoordinate) -> Result<Option<EntryId>, RegistryError> {
        let previous = self.registry.clone();
        let id = self.registry.add_entry(zone);
        self.commit(previous, id.is_some()).await?;
        Ok(id)
    }

    pub async fn update_entry(
        &mut self,
        zone: ZoneCoordinate,
        index: usize,
        field: EntryField,
        value: impl Into<String>,
    ) -> Result<bool, RegistryError> {
        let previous = self.registry.clone();
        let changed = self.registry.update_entry(zone, index, field, value);
        self.commit(previous, changed).await
    }

    /// Update a field of the entry with the given id, wherever it is now.
    pub async fn update_entry_by_id(
        &mut self,
        id: EntryId,
        field: EntryField,
        value: impl Into<String>,
    ) -> Result<bool, RegistryError> {
        match self.registry.position_of(id) {
            Some((zone, index)) => self.update_entry(zone, index, field, value).await,
            None => Ok(false),
        }
    }

    pub async fn remove_entry(
        &mut self,
        zone: ZoneCoordinate,
        index: usize,
    ) -> Result<Option<HotkeyEntry>, RegistryError> {
        let previous = self.registry.clone();
        let removed = self.registry.remove_entry(zone, index);
        self.commit(previous, removed.is_some()).await?;
        Ok(removed)
    }

    pub async fn remove_entry_by_id(&mut self, id: EntryId) -> Result<Option<HotkeyEntry>, RegistryError> {
        match self.registry.position_of(id) {
            Some((zone, index)) => self.remove_entry(zone, index).await,
            None => Ok(None),
        }
    }

    pub async fn move_entry(
        &mut self,
        from_zone: ZoneCoordinate,
        from_index: usize,
        to_zone: ZoneCoordinate,
        to_index: Option<usize>,
    ) -> Result<bool, RegistryError> {
        let previous = self.registry.clone();
        let changed = self.registry.move_entry(from_zone, from_index, to_zone, to_index);
        self.commit(previous, changed).await
    }

    pub async fn rename_zone(
        &mut self,
        zone: ZoneCoordinate,
        name: impl Into<String>,
    ) -> Result<bool, RegistryError> {
        let previous = self.registry.clone();
        let changed = self.registry.rename_zone(zone, name);
        self.commit(previous, changed).await
    }

    /// Rejected silently (returns `false`) when the topology forbids it.
    pub async fn activate_zone(&mut self, zone: ZoneCoordinate) -> Result<bool, RegistryError> {
        let previous = self.registry.clone();
        let changed = self.registry.activate_zone(zone);
        self.commit(previous, changed).await
    }

    /// Rejected silently (returns `false`) when the topology forbids it.
    pub async fn deactivate_zone(&mut self, zone: ZoneCoordinate) -> Result<bool, RegistryError> {
        let previous = self.registry.clone();
        let changed = self.registry.deactivate_zone(zone);
        self.commit(previous, changed).await
    }
}

/// Decode the zone-keyed schema, skipping cells that do not parse.
///
/// `None` when the value is not an object at all.
fn decode_zones(value: &Value) -> Option<BTreeMap<ZoneCoordinate, Zone>> {
    let object = value.as_object()?;
    let mut zones = BTreeMap::new();

    for (key, raw) in object {
        let Ok(id) = key.parse::<ZoneCoordinate>() else {
            warn!("Skipping stored zone with invalid id {:?}", key);
            continue;
        };
        match serde_json::from_value::<Zone>(raw.clone()) {
            Ok(zone) => {
                zones.insert(id, zone);
            }
            Err(e) => warn!("Skipping malformed zone {}: {}", id, e),
        }
    }

    Some(zones)
}

#[cfg(test)]
#[path = "persistent_tests.rs"]
mod tests;
