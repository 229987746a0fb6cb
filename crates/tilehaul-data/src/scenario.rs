//! Scenario loading: resolves a directory of data files into a catalog, a
//! simulation config and an optional command script.
//!
//! A scenario directory holds:
//! - `resources` (required) -- resource names, in ledger order
//! - `facilities` (required) -- facility kinds referencing resources by name
//! - `simulation` (optional) -- overrides for the default config
//! - `script` (optional) -- timed commands for headless runs
//!
//! Each file may be `.ron`, `.toml` or `.json`.

use std::path::{Path, PathBuf};

use tilehaul_core::catalog::{CatalogBuilder, FacilityCatalog};
use tilehaul_core::command::Command;
use tilehaul_core::config::SimConfig;
use tilehaul_core::fixed::Millis;
use tilehaul_core::simulation::{SimError, Simulation};

use crate::loader::{
    DataLoadError, ScenarioFiles, read_config, read_script, register_kinds, register_resources,
};

/// A command issued once `at_ms` of simulated time has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedCommand {
    pub at_ms: Millis,
    pub command: Command,
}

/// Fully resolved scenario content.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub config: SimConfig,
    pub catalog: FacilityCatalog,
    /// Sorted by `at_ms`; entries with equal times keep file order.
    pub script: Vec<ScriptedCommand>,
}

impl Scenario {
    /// A fresh simulation for this scenario.
    pub fn build(&self) -> Result<Simulation, SimError> {
        Simulation::new(self.config.clone(), self.catalog.clone())
    }

    pub fn script_player(&self) -> ScriptPlayer {
        ScriptPlayer::new(self.script.clone())
    }
}

/// Directory of a scenario shipped with this crate, e.g. `"classic"`.
pub fn bundled_scenario_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Load and resolve every data file in `dir`.
pub fn load_scenario(dir: &Path) -> Result<Scenario, DataLoadError> {
    let files = ScenarioFiles::discover(dir)?;

    let mut builder = CatalogBuilder::new();
    register_resources(&mut builder, &files.resources)?;
    register_kinds(&mut builder, &files.facilities)?;
    let catalog = builder.build()?;

    let config = read_config(files.simulation.as_ref())?;
    let script = match &files.script {
        Some(file) => read_script(file, &catalog)?,
        None => Vec::new(),
    };

    log::info!(
        "loaded scenario {}: {} resources, {} facility kinds, {} scripted commands",
        dir.display(),
        catalog.resource_count(),
        catalog.kind_count(),
        script.len()
    );

    Ok(Scenario {
        config,
        catalog,
        script,
    })
}

// ===========================================================================
// Script playback
// ===========================================================================

/// Feeds scripted commands into a simulation as simulated time passes.
#[derive(Debug, Clone)]
pub struct ScriptPlayer {
    entries: Vec<ScriptedCommand>,
    next: usize,
}

impl ScriptPlayer {
    pub fn new(entries: Vec<ScriptedCommand>) -> Self {
        Self { entries, next: 0 }
    }

    /// Execute every command due at the simulation's current elapsed time.
    /// Returns how many were accepted.
    pub fn issue_due(&mut self, sim: &mut Simulation) -> usize {
        let now = sim.clock().elapsed_ms();
        let mut accepted = 0;
        while let Some(entry) = self.entries.get(self.next) {
            if entry.at_ms > now {
                break;
            }
            if sim.execute(entry.command.clone()) {
                accepted += 1;
            }
            self.next += 1;
        }
        accepted
    }

    pub fn remaining(&self) -> usize {
        self.entries.len() - self.next
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }
}
