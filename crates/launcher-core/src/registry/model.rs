//! In-memory zone map and its mutation rules.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use launcher_protocols::{EntryField, EntryId, HotkeyEntry, Zone, ZoneCoordinate};

use crate::topology;

/// Name given to the origin zone when it is first created.
const ORIGIN_NAME: &str = "Default";

/// Zones of hotkey entries keyed by grid cell.
///
/// The origin zone is always present.
#[derive(Debug, Clone)]
pub struct Registry {
    zones: BTreeMap<ZoneCoordinate, Zone>,
}

impl Registry {
    /// A registry holding only an empty origin zone.
    pub fn new() -> Self {
        let mut zones = BTreeMap::new();
        zones.insert(ZoneCoordinate::ORIGIN, Zone::new(ORIGIN_NAME));
        Self { zones }
    }

    /// Build from stored zones, re-creating the origin if it is missing.
    pub fn from_zones(mut zones: BTreeMap<ZoneCoordinate, Zone>) -> Self {
        zones
            .entry(ZoneCoordinate::ORIGIN)
            .or_insert_with(|| Zone::new(ORIGIN_NAME));

        let registry = Self { zones };
        for id in registry.zones.keys() {
            if !id.is_origin() && !id.upstream().any(|n| registry.contains(n)) {
                warn!("Zone {} has no upstream neighbor", id);
            }
        }
        registry
    }

    /// Wrap a legacy flat list into the origin zone.
    pub fn from_legacy(hotkeys: Vec<HotkeyEntry>) -> Self {
        let mut zones = BTreeMap::new();
        zones.insert(
            ZoneCoordinate::ORIGIN,
            Zone::with_hotkeys(ORIGIN_NAME, hotkeys),
        );
        Self { zones }
    }

    pub fn contains(&self, id: ZoneCoordinate) -> bool {
        self.zones.contains_key(&id)
    }

    pub fn zone(&self, id: ZoneCoordinate) -> Option<&Zone> {
        self.zones.get(&id)
    }

    /// Zones in row-major order.
    pub fn zones(&self) -> impl Iterator<Item = (ZoneCoordinate, &Zone)> + '_ {
        self.zones.iter().map(|(id, zone)| (*id, zone))
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn entry(&self, zone: ZoneCoordinate, index: usize) -> Option<&HotkeyEntry> {
        self.zones.get(&zone)?.hotkeys.get(index)
    }

    pub fn entry_by_id(&self, id: EntryId) -> Option<&HotkeyEntry> {
        let (zone, index) = self.position_of(id)?;
        self.entry(zone, index)
    }

    /// Current position of an entry.
    pub fn position_of(&self, id: EntryId) -> Option<(ZoneCoordinate, usize)> {
        self.zones.iter().find_map(|(zone_id, zone)| {
            zone.hotkeys
                .iter()
                .position(|entry| entry.id == id)
                .map(|index| (*zone_id, index))
        })
    }

    /// Append a blank entry. `None` if the zone is absent.
    pub fn add_entry(&mut self, zone: ZoneCoordinate) -> Option<EntryId> {
        let hotkeys = &mut self.zones.get_mut(&zone)?.hotkeys;
        let entry = HotkeyEntry::blank();
        let id = entry.id;
        hotkeys.push(entry);
        debug!("Added entry {} to zone {}", id, zone);
        Some(id)
    }

    /// Set one field of an entry. Values are not validated.
    pub fn update_entry(
        &mut self,
        zone: ZoneCoordinate,
        index: usize,
        field: EntryField,
        value: impl Into<String>,
    ) -> bool {
        let Some(entry) = self
            .zones
            .get_mut(&zone)
            .and_then(|z| z.hotkeys.get_mut(index))
        else {
            return false;
        };
        entry.set_field(field, value);
        true
    }

    pub fn remove_entry(&mut self, zone: ZoneCoordinate, index: usize) -> Option<HotkeyEntry> {
        let hotkeys = &mut self.zones.get_mut(&zone)?.hotkeys;
        if index >= hotkeys.len() {
            return None;
        }
        let removed = hotkeys.remove(index);
        debug!("Removed entry {} from zone {}", removed.id, zone);
        Some(removed)
    }

    /// Move an entry, optionally across zones.
    ///
    /// The entry is taken out first and then inserted at `to_index` in the
    /// target list (clamped to its length); `None` appends.
    pub fn move_entry(
        &mut self,
        from_zone: ZoneCoordinate,
        from_index: usize,
        to_zone: ZoneCoordinate,
        to_index: Option<usize>,
    ) -> bool {
        if !self.contains(to_zone) {
            return false;
        }
        let Some(entry) = self.remove_entry(from_zone, from_index) else {
            return false;
        };

        let Some(target) = self.zones.get_mut(&to_zone) else {
            return false;
        };
        let index = to_index
            .map(|i| i.min(target.hotkeys.len()))
            .unwrap_or(target.hotkeys.len());
        debug!("Moved entry {} to {}[{}]", entry.id, to_zone, index);
        target.hotkeys.insert(index, entry);
        true
    }

    /// Set the raw display name; an empty name is kept as-is.
    pub fn rename_zone(&mut self, zone: ZoneCoordinate, name: impl Into<String>) -> bool {
        match self.zones.get_mut(&zone) {
            Some(z) => {
                z.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Create an empty zone at `id` if the topology allows it.
    pub fn activate_zone(&mut self, id: ZoneCoordinate) -> bool {
        if self.contains(id) || !topology::can_activate(self, id.x(), id.y()) {
            return false;
        }
        self.zones.insert(id, Zone::default());
        debug!("Activated zone {}", id);
        true
    }

    /// Delete the zone at `id`, with its entries, if nothing depends on it.
    pub fn deactivate_zone(&mut self, id: ZoneCoordinate) -> bool {
        if !self.contains(id) || !topology::can_deactivate(self, id.x(), id.y()) {
            return false;
        }
        self.zones.remove(&id);
        debug!("Deleted zone {}", id);
        true
    }

    /// First entry bound to `key` that has a destination.
    ///
    /// Zones are scanned in row-major order, entries in list order.
    pub fn find_binding(&self, key: &str) -> Option<(ZoneCoordinate, &HotkeyEntry)> {
        self.zones.iter().find_map(|(zone_id, zone)| {
            zone.hotkeys
                .iter()
                .find(|entry| entry.key == key)
                .filter(|entry| !entry.url.is_empty())
                .map(|entry| (*zone_id, entry))
        })
    }

    /// Zone-keyed value in the stored schema.
    pub fn to_stored(&self) -> Result<Value, serde_json::Error> {
        let mut map = Map::new();
        for (id, zone) in &self.zones {
            map.insert(id.to_string(), serde_json::to_value(zone)?);
        }
        Ok(Value::Object(map))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
