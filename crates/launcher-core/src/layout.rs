//! Grid layout derived from the zone topology.
//!
//! The grid extends one cell past the furthest occupied row and column so
//! the next rank of expandable cells is reachable, capped at the grid size.

use launcher_protocols::{GRID_SIZE, ZoneCoordinate};

use crate::registry::Registry;
use crate::topology;

/// Sizing class of a grid row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Holds at least one zone.
    Primary,
    /// Holds only expand affordances.
    Inactive,
}

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Zone { deletable: bool },
    Expandable,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub id: ZoneCoordinate,
    pub kind: CellKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: Vec<Band>,
    pub rows: Vec<Band>,
    /// Cells in row-major order.
    pub cells: Vec<GridCell>,
}

impl GridLayout {
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, x: u8, y: u8) -> Option<&GridCell> {
        let id = ZoneCoordinate::new(x, y)?;
        self.cells.iter().find(|cell| cell.id == id)
    }
}

pub fn compute_layout(registry: &Registry) -> GridLayout {
    let (max_x, max_y) = registry
        .zones()
        .fold((0u8, 0u8), |(mx, my), (id, _)| (mx.max(id.x()), my.max(id.y())));

    let width = (max_x + 2).min(GRID_SIZE);
    let height = (max_y + 2).min(GRID_SIZE);

    let band = |occupied: bool| if occupied { Band::Primary } else { Band::Inactive };
    let columns = (0..width)
        .map(|x| band(registry.zones().any(|(id, _)| id.x() == x)))
        .collect();
    let rows = (0..height)
        .map(|y| band(registry.zones().any(|(id, _)| id.y() == y)))
        .collect();

    let cells = ZoneCoordinate::all()
        .filter(|id| id.x() < width && id.y() < height)
        .map(|id| {
            let (x, y) = (id.x(), id.y());
            let kind = if registry.contains(id) {
                CellKind::Zone {
                    deletable: topology::can_deactivate(registry, x, y),
                }
            } else if topology::can_activate(registry, x, y) {
                CellKind::Expandable
            } else {
                CellKind::Blank
            };
            GridCell { id, kind }
        })
        .collect();

    GridLayout {
        columns,
        rows,
        cells,
    }
}
