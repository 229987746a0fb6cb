//! Facility kind and resource definitions.
//!
//! Kinds are immutable templates: a [`CatalogBuilder`] collects resources and
//! kinds, validates them, and freezes them into a [`FacilityCatalog`]. Placed
//! facilities copy their starting level and capacity from the template, so
//! upgrading one facility never touches the catalog.

use crate::id::{FacilityKindId, ResourceId};
use std::collections::HashMap;

/// Capacity added per upgrade in the reference content.
pub const DEFAULT_CAPACITY_STEP: u32 = 10;

/// An RGB display colour. Only the rendering adapter reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
}

/// Presentation attributes for a facility kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayAttributes {
    pub color: Rgb,
    /// Human-readable label. Defaults to the kind name.
    pub label: String,
}

/// One resource yield of a facility kind, scaled by the facility's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionRule {
    pub resource: ResourceId,
    pub per_level: u32,
}

/// A facility kind template.
#[derive(Debug, Clone)]
pub struct FacilityKindDef {
    pub name: String,
    pub capacity: u32,
    pub level: u32,
    /// Capacity gained by each upgrade of a facility of this kind.
    pub capacity_step: u32,
    /// Empty for kinds that produce nothing.
    pub production: Vec<ProductionRule>,
    pub display: DisplayAttributes,
}

impl FacilityKindDef {
    /// A non-producing level-1 kind with the default capacity step.
    pub fn new(name: &str, capacity: u32, color: Rgb) -> Self {
        Self {
            name: name.to_string(),
            capacity,
            level: 1,
            capacity_step: DEFAULT_CAPACITY_STEP,
            production: Vec::new(),
            display: DisplayAttributes {
                color,
                label: name.to_string(),
            },
        }
    }

    /// Add a production rule.
    pub fn producing(mut self, resource: ResourceId, per_level: u32) -> Self {
        self.production.push(ProductionRule {
            resource,
            per_level,
        });
        self
    }

    pub fn is_producer(&self) -> bool {
        !self.production.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate resource: {0}")]
    DuplicateResource(String),
    #[error("duplicate facility kind: {0}")]
    DuplicateKind(String),
    #[error("facility kind '{kind}' has level {level}; levels start at 1")]
    InvalidLevel { kind: String, level: u32 },
    #[error("facility kind '{kind}' produces unregistered resource {resource:?}")]
    UnknownResource { kind: String, resource: ResourceId },
    #[error("not found: {0}")]
    NotFound(String),
}

/// Collects resources and facility kinds, then validates them in [`build`].
///
/// [`build`]: CatalogBuilder::build
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    resources: Vec<String>,
    resource_name_to_id: HashMap<String, ResourceId>,
    kinds: Vec<FacilityKindDef>,
    kind_name_to_id: HashMap<String, FacilityKindId>,
    duplicates: Vec<CatalogError>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource kind. Returns its ID. Registering the same name
    /// twice is reported by `build`.
    pub fn register_resource(&mut self, name: &str) -> ResourceId {
        if let Some(&id) = self.resource_name_to_id.get(name) {
            self.duplicates
                .push(CatalogError::DuplicateResource(name.to_string()));
            return id;
        }
        let id = ResourceId(self.resources.len() as u32);
        self.resources.push(name.to_string());
        self.resource_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Register a facility kind. Returns its ID.
    pub fn register_kind(&mut self, def: FacilityKindDef) -> FacilityKindId {
        if let Some(&id) = self.kind_name_to_id.get(&def.name) {
            self.duplicates
                .push(CatalogError::DuplicateKind(def.name.clone()));
            return id;
        }
        let id = FacilityKindId(self.kinds.len() as u32);
        self.kind_name_to_id.insert(def.name.clone(), id);
        self.kinds.push(def);
        id
    }

    /// Mutate a registered kind by name before the catalog is frozen.
    pub fn mutate_kind<F>(&mut self, name: &str, f: F) -> Result<(), CatalogError>
    where
        F: FnOnce(&mut FacilityKindDef),
    {
        let id = self
            .kind_name_to_id
            .get(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;
        f(&mut self.kinds[id.index()]);
        Ok(())
    }

    pub fn resource_id(&self, name: &str) -> Option<ResourceId> {
        self.resource_name_to_id.get(name).copied()
    }

    pub fn kind_id(&self, name: &str) -> Option<FacilityKindId> {
        self.kind_name_to_id.get(name).copied()
    }

    /// Validate and freeze the catalog.
    pub fn build(mut self) -> Result<FacilityCatalog, CatalogError> {
        if !self.duplicates.is_empty() {
            return Err(self.duplicates.swap_remove(0));
        }

        for kind in &self.kinds {
            if kind.level == 0 {
                return Err(CatalogError::InvalidLevel {
                    kind: kind.name.clone(),
                    level: kind.level,
                });
            }
            for rule in &kind.production {
                if rule.resource.index() >= self.resources.len() {
                    return Err(CatalogError::UnknownResource {
                        kind: kind.name.clone(),
                        resource: rule.resource,
                    });
                }
            }
        }

        Ok(FacilityCatalog {
            resources: self.resources,
            resource_name_to_id: self.resource_name_to_id,
            kinds: self.kinds,
            kind_name_to_id: self.kind_name_to_id,
        })
    }
}

/// Immutable catalog of facility kinds and resources.
#[derive(Debug, Clone)]
pub struct FacilityCatalog {
    resources: Vec<String>,
    resource_name_to_id: HashMap<String, ResourceId>,
    kinds: Vec<FacilityKindDef>,
    kind_name_to_id: HashMap<String, FacilityKindId>,
}

impl FacilityCatalog {
    /// The stock content: warehouse, factory (1 wood per level) and depot,
    /// tracking wood, metal and fuel.
    pub fn classic() -> Self {
        let mut b = CatalogBuilder::new();
        let wood = b.register_resource("wood");
        b.register_resource("metal");
        b.register_resource("fuel");

        b.register_kind(FacilityKindDef::new("warehouse", 50, Rgb::GREEN));
        b.register_kind(FacilityKindDef::new("factory", 30, Rgb::BLUE).producing(wood, 1));
        b.register_kind(FacilityKindDef::new("depot", 20, Rgb::RED));

        match b.build() {
            Ok(catalog) => catalog,
            Err(e) => unreachable!("classic catalog is statically valid: {e}"),
        }
    }

    pub fn kind(&self, id: FacilityKindId) -> Option<&FacilityKindDef> {
        self.kinds.get(id.index())
    }

    pub fn kind_id(&self, name: &str) -> Option<FacilityKindId> {
        self.kind_name_to_id.get(name).copied()
    }

    pub fn kind_by_name(&self, name: &str) -> Option<(FacilityKindId, &FacilityKindDef)> {
        let id = self.kind_id(name)?;
        Some((id, &self.kinds[id.index()]))
    }

    /// Kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = (FacilityKindId, &FacilityKindDef)> {
        self.kinds
            .iter()
            .enumerate()
            .map(|(i, def)| (FacilityKindId(i as u32), def))
    }

    pub fn resource_name(&self, id: ResourceId) -> Option<&str> {
        self.resources.get(id.index()).map(String::as_str)
    }

    pub fn resource_id(&self, name: &str) -> Option<ResourceId> {
        self.resource_name_to_id.get(name).copied()
    }

    /// Resource names in registration order.
    pub fn resources(&self) -> impl Iterator<Item = (ResourceId, &str)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(i, name)| (ResourceId(i as u32), name.as_str()))
    }

    pub fn kind_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}
