//! Shared test helpers for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests and, via the `test-utils` feature, in other
//! crates' tests.

use crate::catalog::FacilityCatalog;
use crate::config::SimConfig;
use crate::fixed::{Fixed64, Millis};
use crate::grid::GridPosition;
use crate::simulation::{AdvanceResult, Simulation};

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

pub fn pos(x: i32, y: i32) -> GridPosition {
    GridPosition::new(x, y)
}

/// Default config with the warehouse/factory/depot catalog.
pub fn classic_sim() -> Simulation {
    sim_with(SimConfig::default())
}

pub fn sim_with(config: SimConfig) -> Simulation {
    Simulation::new(config, FacilityCatalog::classic()).unwrap()
}

/// Advance in frame-rate sized steps until exactly `ms` has elapsed. The last
/// frame is shortened if needed. Returns the combined result.
pub fn run_for_ms(sim: &mut Simulation, ms: Millis) -> AdvanceResult {
    let mut combined = AdvanceResult::default();
    let mut remaining = ms;
    while remaining > 0 {
        let dt = sim.config().frame_duration_ms(sim.frame()).min(remaining);
        let result = sim.advance(dt).unwrap();
        combined.production_ticks += result.production_ticks;
        combined.arrivals.extend(result.arrivals);
        remaining -= dt;
    }
    combined
}

/// Advance `frames` frames at the configured frame rate.
pub fn run_frames(sim: &mut Simulation, frames: u64) -> AdvanceResult {
    let mut combined = AdvanceResult::default();
    for _ in 0..frames {
        let dt = sim.config().frame_duration_ms(sim.frame());
        let result = sim.advance(dt).unwrap();
        combined.production_ticks += result.production_ticks;
        combined.arrivals.extend(result.arrivals);
    }
    combined
}
