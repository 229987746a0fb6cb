//! The placement grid: a fixed `width x height` array of cells, each empty or
//! holding exactly one facility instance.
//!
//! Placement and upgrade are player commands, so out-of-bounds coordinates
//! and occupied or empty cells are ordinary rejections reported through
//! [`PlaceError`] / [`UpgradeError`] (or the boolean forms). Only the internal
//! [`Grid::cell`] lookup treats bad coordinates as a caller bug.

use crate::catalog::FacilityKindDef;
use crate::fixed::Fixed64;
use crate::id::{FacilityId, FacilityKindId};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A cell coordinate. Signed so that pointer positions left of or above the
/// grid map to out-of-bounds cells instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Top-left pixel of this cell, each axis clamped to
    /// `±PIXEL_LIMIT`. Use [`checked_to_pixels`](Self::checked_to_pixels)
    /// to detect cells beyond the limit.
    pub fn to_pixels(self, tile_size: u32) -> PixelPosition {
        let tile = i64::from(tile_size);
        let axis = |v: i32| {
            Fixed64::from_num((i64::from(v) * tile).clamp(-PIXEL_LIMIT, PIXEL_LIMIT))
        };
        PixelPosition {
            x: axis(self.x),
            y: axis(self.y),
        }
    }

    /// Top-left pixel of this cell, or `None` if either axis lies beyond
    /// `±PIXEL_LIMIT`.
    pub fn checked_to_pixels(self, tile_size: u32) -> Option<PixelPosition> {
        let tile = i64::from(tile_size);
        let x = i64::from(self.x) * tile;
        let y = i64::from(self.y) * tile;
        (x.abs() <= PIXEL_LIMIT && y.abs() <= PIXEL_LIMIT).then(|| self.to_pixels(tile_size))
    }
}

/// Largest pixel coordinate magnitude a cell or waypoint may map to. Half of
/// the Q32.32 integer range, so the gap between any two pixel positions
/// still fits in a [`Fixed64`].
pub const PIXEL_LIMIT: i64 = (1 << 30) - 1;

/// A position in continuous pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: Fixed64,
    pub y: Fixed64,
}

impl PixelPosition {
    pub fn new(x: Fixed64, y: Fixed64) -> Self {
        Self { x, y }
    }

    pub fn from_int(x: i32, y: i32) -> Self {
        Self {
            x: Fixed64::from_num(x),
            y: Fixed64::from_num(y),
        }
    }
}

// ---------------------------------------------------------------------------
// Facility instances
// ---------------------------------------------------------------------------

/// A facility placed on the grid. Owns its level and capacity; the kind is
/// only consulted for production rules and display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    pub kind: FacilityKindId,
    pub position: GridPosition,
    pub level: u32,
    pub capacity: u32,
    pub capacity_step: u32,
}

impl Facility {
    fn from_template(kind: FacilityKindId, def: &FacilityKindDef, position: GridPosition) -> Self {
        Self {
            kind,
            position,
            level: def.level,
            capacity: def.capacity,
            capacity_step: def.capacity_step,
        }
    }

    fn upgrade(&mut self) {
        self.level = self.level.saturating_add(1);
        self.capacity = self.capacity.saturating_add(self.capacity_step);
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    #[error("({}, {}) is outside the grid", .0.x, .0.y)]
    OutOfBounds(GridPosition),
    #[error("({}, {}) is already occupied", .0.x, .0.y)]
    Occupied(GridPosition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UpgradeError {
    #[error("({}, {}) is outside the grid", .0.x, .0.y)]
    OutOfBounds(GridPosition),
    #[error("no facility at ({}, {})", .0.x, .0.y)]
    Empty(GridPosition),
}

/// Misuse of the internal grid API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell ({}, {}) is outside the {width}x{height} grid", .pos.x, .pos.y)]
    OutOfBounds {
        pos: GridPosition,
        width: u32,
        height: u32,
    },
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    /// Row-major: index = y * width + x.
    cells: Vec<Option<FacilityId>>,
    facilities: SlotMap<FacilityId, Facility>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            facilities: SlotMap::with_key(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: GridPosition) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Internal lookup that fails fast on coordinates outside the grid.
    pub fn cell(&self, pos: GridPosition) -> Result<Option<FacilityId>, GridError> {
        let idx = self.index(pos).ok_or(GridError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        })?;
        Ok(self.cells[idx])
    }

    // -- Commands --

    /// Place a new facility of `kind` at `pos`, copying its starting level
    /// and capacity from `def`. Never overwrites an occupied cell.
    pub fn try_place(
        &mut self,
        kind: FacilityKindId,
        def: &FacilityKindDef,
        pos: GridPosition,
    ) -> Result<FacilityId, PlaceError> {
        let idx = self.index(pos).ok_or(PlaceError::OutOfBounds(pos))?;
        if self.cells[idx].is_some() {
            return Err(PlaceError::Occupied(pos));
        }
        let id = self
            .facilities
            .insert(Facility::from_template(kind, def, pos));
        self.cells[idx] = Some(id);
        Ok(id)
    }

    pub fn place(&mut self, kind: FacilityKindId, def: &FacilityKindDef, pos: GridPosition) -> bool {
        self.try_place(kind, def, pos).is_ok()
    }

    /// Raise the facility at `pos` by one level and its capacity by the
    /// facility's capacity step. Returns the upgraded facility.
    pub fn try_upgrade(&mut self, pos: GridPosition) -> Result<&Facility, UpgradeError> {
        let idx = self.index(pos).ok_or(UpgradeError::OutOfBounds(pos))?;
        let id = self.cells[idx].ok_or(UpgradeError::Empty(pos))?;
        let facility = self
            .facilities
            .get_mut(id)
            .ok_or(UpgradeError::Empty(pos))?;
        facility.upgrade();
        Ok(&*facility)
    }

    pub fn upgrade(&mut self, pos: GridPosition) -> bool {
        self.try_upgrade(pos).is_ok()
    }

    // -- Queries --

    /// The kind occupying `pos`, or `None` for empty or out-of-bounds cells.
    pub fn kind_at(&self, pos: GridPosition) -> Option<FacilityKindId> {
        self.facility_at(pos).map(|(_, f)| f.kind)
    }

    pub fn facility_at(&self, pos: GridPosition) -> Option<(FacilityId, &Facility)> {
        let id = self.cells[self.index(pos)?]?;
        self.facilities.get(id).map(|f| (id, f))
    }

    pub fn facility(&self, id: FacilityId) -> Option<&Facility> {
        self.facilities.get(id)
    }

    pub fn is_occupied(&self, pos: GridPosition) -> bool {
        self.facility_at(pos).is_some()
    }

    /// Placed facilities in row-major cell order.
    pub fn facilities(&self) -> impl Iterator<Item = (FacilityId, &Facility)> {
        self.cells
            .iter()
            .filter_map(|cell| *cell)
            .filter_map(|id| self.facilities.get(id).map(|f| (id, f)))
    }

    pub fn occupied_count(&self) -> usize {
        self.facilities.len()
    }
}
