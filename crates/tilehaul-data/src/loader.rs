//! Reading scenario files and resolving the names inside them.
//!
//! [`ScenarioFiles::discover`] finds the files of a scenario directory and
//! [`DataFile`] parses one of them. The `register_*` and `read_*` functions
//! turn parsed records into core types: resource and kind names go into a
//! [`CatalogBuilder`], settings are applied over [`SimConfig::default`], and
//! script entries are checked against the built [`FacilityCatalog`].

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tilehaul_core::catalog::{CatalogBuilder, CatalogError, FacilityCatalog, FacilityKindDef, Rgb};
use tilehaul_core::command::Command;
use tilehaul_core::config::{ConfigError, SimConfig};
use tilehaul_core::fixed::f64_to_fixed64;
use tilehaul_core::grid::GridPosition;

use crate::scenario::ScriptedCommand;
use crate::schema::{CommandData, FacilityData, ResourceData, ScriptEntryData, SimulationData};

// ===========================================================================
// Errors
// ===========================================================================

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("no {stem} file (.ron, .toml or .json) in {dir}")]
    MissingFile { stem: &'static str, dir: PathBuf },

    #[error("{file} is not a .ron, .toml or .json file")]
    UnsupportedFormat { file: PathBuf },

    /// The same scenario file exists in two formats.
    #[error("both {a} and {b} exist")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    #[error("cannot parse {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    #[error("resource '{name}' is listed twice in {file}")]
    DuplicateResource { file: PathBuf, name: String },

    #[error("facility kind '{name}' is defined twice in {file}")]
    DuplicateKind { file: PathBuf, name: String },

    #[error("facility kind '{kind}' in {file} produces unknown resource '{resource}'")]
    UnknownResource {
        file: PathBuf,
        kind: String,
        resource: String,
    },

    #[error("script entry at {at_ms} ms in {file} places unknown facility kind '{kind}'")]
    UnknownKind {
        file: PathBuf,
        at_ms: u64,
        kind: String,
    },

    /// A setting parsed but has no fixed-point representation.
    #[error("{field} = {value} in {file} is out of range")]
    OutOfRange {
        file: PathBuf,
        field: &'static str,
        value: f64,
    },

    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("invalid simulation settings: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Files
// ===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    /// Extensions in lookup order.
    const EXTENSIONS: [(Format, &'static str); 3] = [
        (Format::Ron, "ron"),
        (Format::Toml, "toml"),
        (Format::Json, "json"),
    ];

    pub fn of(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?;
        Self::EXTENSIONS
            .iter()
            .find(|(_, e)| *e == ext)
            .map(|&(format, _)| format)
    }
}

/// One data file and the format named by its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    pub path: PathBuf,
    pub format: Format,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DataLoadError> {
        let path = path.into();
        match Format::of(&path) {
            Some(format) => Ok(Self { path, format }),
            None => Err(DataLoadError::UnsupportedFormat { file: path }),
        }
    }

    fn parse_error(&self, detail: impl std::fmt::Display) -> DataLoadError {
        DataLoadError::Parse {
            file: self.path.clone(),
            detail: detail.to_string(),
        }
    }

    /// Deserialize the whole file.
    pub fn read<T: DeserializeOwned>(&self) -> Result<T, DataLoadError> {
        let content = std::fs::read_to_string(&self.path)?;
        log::debug!("reading {} as {:?}", self.path.display(), self.format);

        match self.format {
            Format::Ron => ron::from_str(&content).map_err(|e| self.parse_error(e)),
            Format::Json => serde_json::from_str(&content).map_err(|e| self.parse_error(e)),
            Format::Toml => toml::from_str(&content).map_err(|e| self.parse_error(e)),
        }
    }

    /// Deserialize a list. RON and JSON files hold it at the top level;
    /// TOML files hold it as the `[[key]]` array of tables.
    pub fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, DataLoadError> {
        if self.format != Format::Toml {
            return self.read();
        }
        let mut table: toml::Table = self.read()?;
        let list = table
            .remove(key)
            .ok_or_else(|| self.parse_error(format!("no [[{key}]] entries")))?;
        list.try_into()
            .map_err(|e: toml::de::Error| self.parse_error(e))
    }
}

/// The files of a scenario directory. Resources and facilities are
/// required; settings and script are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioFiles {
    pub resources: DataFile,
    pub facilities: DataFile,
    pub simulation: Option<DataFile>,
    pub script: Option<DataFile>,
}

impl ScenarioFiles {
    pub fn discover(dir: &Path) -> Result<Self, DataLoadError> {
        Ok(Self {
            resources: require(dir, "resources")?,
            facilities: require(dir, "facilities")?,
            simulation: locate(dir, "simulation")?,
            script: locate(dir, "script")?,
        })
    }
}

/// `{stem}` in any supported format. Two formats at once are an error.
fn locate(dir: &Path, stem: &str) -> Result<Option<DataFile>, DataLoadError> {
    let mut found: Option<DataFile> = None;
    for (format, ext) in Format::EXTENSIONS {
        let path = dir.join(format!("{stem}.{ext}"));
        if !path.is_file() {
            continue;
        }
        if let Some(existing) = found {
            return Err(DataLoadError::ConflictingFormats {
                a: existing.path,
                b: path,
            });
        }
        found = Some(DataFile { path, format });
    }
    Ok(found)
}

fn require(dir: &Path, stem: &'static str) -> Result<DataFile, DataLoadError> {
    locate(dir, stem)?.ok_or_else(|| DataLoadError::MissingFile {
        stem,
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Catalog
// ===========================================================================

/// Register every resource in file order. Ledger order follows.
pub fn register_resources(
    builder: &mut CatalogBuilder,
    file: &DataFile,
) -> Result<(), DataLoadError> {
    let resources: Vec<ResourceData> = file.read_list("resources")?;
    for resource in resources {
        if builder.resource_id(&resource.name).is_some() {
            return Err(DataLoadError::DuplicateResource {
                file: file.path.clone(),
                name: resource.name,
            });
        }
        builder.register_resource(&resource.name);
    }
    Ok(())
}

/// Register every facility kind, resolving production resources by name.
/// Resources must be registered first.
pub fn register_kinds(builder: &mut CatalogBuilder, file: &DataFile) -> Result<(), DataLoadError> {
    let facilities: Vec<FacilityData> = file.read_list("facilities")?;
    for data in &facilities {
        if builder.kind_id(&data.name).is_some() {
            return Err(DataLoadError::DuplicateKind {
                file: file.path.clone(),
                name: data.name.clone(),
            });
        }
        let def = kind_def(builder, data, file)?;
        builder.register_kind(def);
    }
    Ok(())
}

fn kind_def(
    builder: &CatalogBuilder,
    data: &FacilityData,
    file: &DataFile,
) -> Result<FacilityKindDef, DataLoadError> {
    let (r, g, b) = data.color;
    let mut def = FacilityKindDef::new(&data.name, data.capacity, Rgb(r, g, b));
    def.level = data.level;
    def.capacity_step = data.capacity_step;
    if let Some(label) = &data.label {
        def.display.label = label.clone();
    }
    for (resource, per_level) in &data.production {
        let id = builder
            .resource_id(resource)
            .ok_or_else(|| DataLoadError::UnknownResource {
                file: file.path.clone(),
                kind: data.name.clone(),
                resource: resource.clone(),
            })?;
        def = def.producing(id, *per_level);
    }
    Ok(def)
}

// ===========================================================================
// Settings
// ===========================================================================

/// The default config with `file`'s overrides applied, validated.
pub fn read_config(file: Option<&DataFile>) -> Result<SimConfig, DataLoadError> {
    let mut config = SimConfig::default();
    if let Some(file) = file {
        let data: SimulationData = file.read()?;
        apply_settings(&mut config, &data, file)?;
    }
    config.validate()?;
    Ok(config)
}

fn apply_settings(
    config: &mut SimConfig,
    data: &SimulationData,
    file: &DataFile,
) -> Result<(), DataLoadError> {
    if let Some(w) = data.grid_width {
        config.grid_width = w;
    }
    if let Some(h) = data.grid_height {
        config.grid_height = h;
    }
    if let Some(t) = data.tile_size {
        config.tile_size = t;
    }
    if let Some(speed) = data.vehicle_speed {
        config.vehicle_speed =
            f64_to_fixed64(speed).ok_or_else(|| DataLoadError::OutOfRange {
                file: file.path.clone(),
                field: "vehicle_speed",
                value: speed,
            })?;
    }
    if let Some(ms) = data.production_interval_ms {
        config.production_interval_ms = ms;
    }
    if let Some(n) = data.initial_vehicles {
        config.initial_vehicles = n;
    }
    if let Some((x, y)) = data.vehicle_spawn {
        config.vehicle_spawn = GridPosition::new(x, y);
    }
    if let Some(fps) = data.frame_rate {
        config.frame_rate = fps;
    }
    if let Some(cap) = data.event_capacity {
        config.event_capacity = cap;
    }
    Ok(())
}

// ===========================================================================
// Script
// ===========================================================================

/// Script entries checked against `catalog`, stably sorted by time.
pub fn read_script(
    file: &DataFile,
    catalog: &FacilityCatalog,
) -> Result<Vec<ScriptedCommand>, DataLoadError> {
    let entries: Vec<ScriptEntryData> = file.read_list("script")?;
    let mut script = entries
        .into_iter()
        .map(|entry| resolve_entry(entry, catalog, file))
        .collect::<Result<Vec<_>, _>>()?;
    script.sort_by_key(|entry| entry.at_ms);
    Ok(script)
}

fn resolve_entry(
    entry: ScriptEntryData,
    catalog: &FacilityCatalog,
    file: &DataFile,
) -> Result<ScriptedCommand, DataLoadError> {
    let cell = |(x, y): (i32, i32)| GridPosition::new(x, y);
    let command = match entry.command {
        CommandData::Place { kind, at } => {
            if catalog.kind_id(&kind).is_none() {
                return Err(DataLoadError::UnknownKind {
                    file: file.path.clone(),
                    at_ms: entry.at_ms,
                    kind,
                });
            }
            Command::place(&kind, cell(at))
        }
        CommandData::Upgrade { at } => Command::upgrade(cell(at)),
        CommandData::Assign { from, to } => Command::assign(cell(from), cell(to)),
    };
    Ok(ScriptedCommand {
        at_ms: entry.at_ms,
        command,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
