//! Read-only query API for the rendering adapter.
//!
//! Snapshot types are owned copies, so a renderer can hold them across frames
//! without borrowing the simulation.

use crate::catalog::{FacilityCatalog, Rgb};
use crate::fixed::Fixed64;
use crate::grid::{Grid, GridPosition, PixelPosition};
use crate::id::{FacilityId, FacilityKindId, ResourceId, VehicleId};
use crate::ledger::ResourceLedger;
use crate::vehicle::{VehiclePool, VehicleState};

// ---------------------------------------------------------------------------
// Cell snapshot
// ---------------------------------------------------------------------------

/// An occupied cell with everything needed to draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSnapshot {
    pub position: GridPosition,
    pub facility: FacilityId,
    pub kind: FacilityKindId,
    pub kind_name: String,
    pub level: u32,
    pub capacity: u32,
    pub color: Rgb,
    pub label: String,
}

// ---------------------------------------------------------------------------
// Vehicle snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub position: PixelPosition,
    pub state: VehicleState,
    /// Waypoints not yet reached, head first.
    pub route: Vec<GridPosition>,
}

impl VehicleSnapshot {
    /// Pixel position rounded down, for drawing.
    pub fn pixel(&self) -> (i32, i32) {
        (
            self.position.x.floor().to_num::<i32>(),
            self.position.y.floor().to_num::<i32>(),
        )
    }

    pub fn x(&self) -> Fixed64 {
        self.position.x
    }

    pub fn y(&self) -> Fixed64 {
        self.position.y
    }
}

// ---------------------------------------------------------------------------
// Resource snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSnapshot {
    pub resource: ResourceId,
    pub name: String,
    pub quantity: u64,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Occupied cells in row-major order. Facilities whose kind is missing from
/// the catalog are skipped.
pub fn cells(grid: &Grid, catalog: &FacilityCatalog) -> Vec<CellSnapshot> {
    grid.facilities()
        .filter_map(|(id, facility)| {
            let def = catalog.kind(facility.kind)?;
            Some(CellSnapshot {
                position: facility.position,
                facility: id,
                kind: facility.kind,
                kind_name: def.name.clone(),
                level: facility.level,
                capacity: facility.capacity,
                color: def.display.color,
                label: def.display.label.clone(),
            })
        })
        .collect()
}

pub fn vehicles(pool: &VehiclePool) -> Vec<VehicleSnapshot> {
    pool.iter()
        .map(|(id, v)| VehicleSnapshot {
            id,
            position: v.position(),
            state: v.state(),
            route: v.route().iter().copied().collect(),
        })
        .collect()
}

pub fn resources(ledger: &ResourceLedger, catalog: &FacilityCatalog) -> Vec<ResourceSnapshot> {
    catalog
        .resources()
        .map(|(id, name)| ResourceSnapshot {
            resource: id,
            name: name.to_string(),
            quantity: ledger.get(id).unwrap_or(0),
        })
        .collect()
}

/// One-line resource readout: `Wood: 3  |  Metal: 0  |  Fuel: 0`.
pub fn status_line(resources: &[ResourceSnapshot]) -> String {
    resources
        .iter()
        .map(|r| format!("{}: {}", capitalize(&r.name), r.quantity))
        .collect::<Vec<_>>()
        .join("  |  ")
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
