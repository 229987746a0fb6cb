//! Data-driven scenario loading for Tilehaul.
//!
//! Reads resources, facility kinds, simulation settings and command scripts
//! from RON, TOML or JSON files and resolves them into core types.

pub mod loader;
pub mod scenario;
pub mod schema;

pub use loader::{DataFile, DataLoadError, Format, ScenarioFiles};
pub use scenario::{Scenario, ScriptPlayer, ScriptedCommand, bundled_scenario_dir, load_scenario};
