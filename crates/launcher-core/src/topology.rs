//! Zone topology rules.
//!
//! Zones grow rightward and downward from the origin. A zone may exist only
//! next to an upstream zone (left or above) and may be removed only when no
//! zone downstream of it (right or below) would be orphaned.

use launcher_protocols::ZoneCoordinate;

use crate::registry::Registry;

/// Whether the cell `(x, y)` may hold a zone given the current registry.
pub fn can_activate(registry: &Registry, x: u8, y: u8) -> bool {
    if x == 0 && y == 0 {
        return true;
    }
    let Some(cell) = ZoneCoordinate::new(x, y) else {
        return false;
    };
    cell.upstream().any(|neighbor| registry.contains(neighbor))
}

/// Whether the zone at `(x, y)` may be deleted without orphaning another.
pub fn can_deactivate(registry: &Registry, x: u8, y: u8) -> bool {
    let Some(cell) = ZoneCoordinate::new(x, y) else {
        return false;
    };
    if cell.is_origin() {
        return false;
    }
    !cell.downstream().any(|neighbor| registry.contains(neighbor))
}
