//! Serde data file structs for scenario content.
//!
//! These structs define the on-disk format for resources, facility kinds,
//! simulation settings and command scripts. They are deserialized from RON,
//! JSON, or TOML files and then resolved into core types by the loader.

use serde::Deserialize;

// ===========================================================================
// Resources
// ===========================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceData {
    pub name: String,
}

// ===========================================================================
// Facility kinds
// ===========================================================================

/// A facility kind definition. Production entries are `(resource, per_level)`.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilityData {
    pub name: String,
    pub capacity: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_capacity_step")]
    pub capacity_step: u32,
    #[serde(default)]
    pub production: Vec<(String, u32)>,
    #[serde(default = "default_color")]
    pub color: (u8, u8, u8),
    #[serde(default)]
    pub label: Option<String>,
}

fn default_level() -> u32 {
    1
}

fn default_capacity_step() -> u32 {
    tilehaul_core::catalog::DEFAULT_CAPACITY_STEP
}

fn default_color() -> (u8, u8, u8) {
    (128, 128, 128)
}

// ===========================================================================
// Simulation settings
// ===========================================================================

/// Overrides for the default simulation config. Absent fields keep their
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimulationData {
    pub grid_width: Option<u32>,
    pub grid_height: Option<u32>,
    pub tile_size: Option<u32>,
    /// Pixels per frame.
    pub vehicle_speed: Option<f64>,
    pub production_interval_ms: Option<u64>,
    pub initial_vehicles: Option<u32>,
    pub vehicle_spawn: Option<(i32, i32)>,
    pub frame_rate: Option<u32>,
    pub event_capacity: Option<usize>,
}

// ===========================================================================
// Scripts
// ===========================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptEntryData {
    /// Simulated time at which the command is issued.
    pub at_ms: u64,
    pub command: CommandData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandData {
    Place { kind: String, at: (i32, i32) },
    Upgrade { at: (i32, i32) },
    Assign { from: (i32, i32), to: (i32, i32) },
}
