//! Accumulated resource totals.
//!
//! The ledger is only ever credited, once per production tick, by scanning
//! the facilities placed on the grid. Each placed facility credits
//! `per_level * level` for every production rule of its kind, so two
//! factories yield twice what one does.

use crate::catalog::FacilityCatalog;
use crate::grid::Grid;
use crate::id::ResourceId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("resource {0:?} is not tracked by the ledger")]
    UnknownResource(ResourceId),
    #[error("resource '{0}' is not tracked by the ledger")]
    UnknownResourceName(String),
}

/// Amounts credited by one production tick, indexed by resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductionReport {
    pub credited: Vec<(ResourceId, u64)>,
}

impl ProductionReport {
    pub fn total(&self) -> u64 {
        self.credited.iter().map(|(_, q)| q).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.credited.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ResourceLedger {
    names: Vec<String>,
    totals: Vec<u64>,
}

impl ResourceLedger {
    /// A ledger tracking every resource in the catalog, all at zero.
    pub fn new(catalog: &FacilityCatalog) -> Self {
        let names: Vec<String> = catalog.resources().map(|(_, n)| n.to_string()).collect();
        let totals = vec![0; names.len()];
        Self { names, totals }
    }

    pub fn get(&self, id: ResourceId) -> Result<u64, LedgerError> {
        self.totals
            .get(id.index())
            .copied()
            .ok_or(LedgerError::UnknownResource(id))
    }

    pub fn quantity(&self, name: &str) -> Result<u64, LedgerError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.totals[i])
            .ok_or_else(|| LedgerError::UnknownResourceName(name.to_string()))
    }

    fn credit(&mut self, id: ResourceId, amount: u64) -> Result<(), LedgerError> {
        let total = self
            .totals
            .get_mut(id.index())
            .ok_or(LedgerError::UnknownResource(id))?;
        *total = total.saturating_add(amount);
        Ok(())
    }

    /// Run one production tick over every placed facility.
    pub fn tick(
        &mut self,
        grid: &Grid,
        catalog: &FacilityCatalog,
    ) -> Result<ProductionReport, LedgerError> {
        let mut produced = vec![0u64; self.totals.len()];

        for (_, facility) in grid.facilities() {
            let Some(kind) = catalog.kind(facility.kind) else {
                continue;
            };
            for rule in &kind.production {
                let amount = u64::from(rule.per_level) * u64::from(facility.level);
                let slot = produced
                    .get_mut(rule.resource.index())
                    .ok_or(LedgerError::UnknownResource(rule.resource))?;
                *slot = slot.saturating_add(amount);
            }
        }

        let mut report = ProductionReport::default();
        for (i, amount) in produced.into_iter().enumerate() {
            if amount == 0 {
                continue;
            }
            let id = ResourceId(i as u32);
            self.credit(id, amount)?;
            report.credited.push((id, amount));
        }
        Ok(report)
    }

    /// Owned `(name, quantity)` pairs in registration order.
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        self.names
            .iter()
            .cloned()
            .zip(self.totals.iter().copied())
            .collect()
    }

    pub fn resource_count(&self) -> usize {
        self.totals.len()
    }

    pub(crate) fn totals(&self) -> &[u64] {
        &self.totals
    }
}
