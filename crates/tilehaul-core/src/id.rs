use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a placed facility instance on the grid.
    pub struct FacilityId;

    /// Identifies a vehicle in the pool.
    pub struct VehicleId;
}

/// Identifies a facility kind in the catalog. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacilityKindId(pub u32);

/// Identifies a resource kind tracked by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub u32);

impl FacilityKindId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl ResourceId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
