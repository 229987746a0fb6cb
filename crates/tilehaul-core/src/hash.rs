//! Determinism fingerprint of a simulation.
//!
//! [`StateHasher`] folds each part of the world into a 64-bit FNV-1a digest.
//! Two simulations fed the same commands and frame durations must produce the
//! same value; replay and fuzz tests compare it frame by frame.

use crate::clock::SimulationClock;
use crate::grid::{Grid, GridPosition};
use crate::ledger::ResourceLedger;
use crate::vehicle::VehiclePool;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Accumulates simulation state. Feed the parts in a fixed order, then
/// [`finish`](Self::finish).
#[derive(Debug, Clone, Copy)]
pub struct StateHasher(u64);

impl StateHasher {
    pub fn new() -> Self {
        Self(FNV_OFFSET)
    }

    fn bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= u64::from(b);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    fn u32(&mut self, v: u32) {
        self.bytes(&v.to_le_bytes());
    }

    fn u64(&mut self, v: u64) {
        self.bytes(&v.to_le_bytes());
    }

    fn cell(&mut self, pos: GridPosition) {
        self.bytes(&pos.x.to_le_bytes());
        self.bytes(&pos.y.to_le_bytes());
    }

    /// Dimensions, then every facility's cell, kind, level and capacity in
    /// placement order.
    pub fn grid(&mut self, grid: &Grid) -> &mut Self {
        self.u32(grid.width());
        self.u32(grid.height());
        for (_, facility) in grid.facilities() {
            self.cell(facility.position);
            self.u32(facility.kind.0);
            self.u32(facility.level);
            self.u32(facility.capacity);
        }
        self
    }

    /// Raw fixed-point position and remaining route of each vehicle.
    pub fn vehicles(&mut self, vehicles: &VehiclePool) -> &mut Self {
        for (_, vehicle) in vehicles.iter() {
            let p = vehicle.position();
            self.bytes(&p.x.to_bits().to_le_bytes());
            self.bytes(&p.y.to_bits().to_le_bytes());
            self.u64(vehicle.route().len() as u64);
            for &waypoint in vehicle.route() {
                self.cell(waypoint);
            }
        }
        self
    }

    pub fn ledger(&mut self, ledger: &ResourceLedger) -> &mut Self {
        for &total in ledger.totals() {
            self.u64(total);
        }
        self
    }

    pub fn clock(&mut self, clock: &SimulationClock) -> &mut Self {
        self.u64(clock.elapsed_ms());
        self.u64(clock.accumulated_ms());
        self
    }

    pub fn finish(&self) -> u64 {
        self.0
    }
}

impl Default for StateHasher {
    fn default() -> Self {
        Self::new()
    }
}
