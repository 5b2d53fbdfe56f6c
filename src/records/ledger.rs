//! In-memory ledger of one record per component name.
//!
//! Phases never hold references into the ledger; they hand back value-shaped
//! results that are matched by component name.
use super::types::{EnrichmentRecord, EnrichmentStatus};
use crate::component::{Component, ComponentType, SkipMarker};
use std::collections::{BTreeMap, BTreeSet};

/// Records keyed by component name.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentLedger {
    records: BTreeMap<String, EnrichmentRecord>,
}

impl EnrichmentLedger {
    /// Seed a `NOT_PROCESSED` record for every discovered component that has
    /// both a name and a type. Unaddressable components are left out.
    pub fn from_components(discovered: &[Component]) -> Self {
        let mut records = BTreeMap::new();
        for component in discovered {
            let (Some(name), Some(component_type)) =
                (component.addressable_name(), component.component_type.as_ref())
            else {
                continue;
            };
            records.entry(name.to_string()).or_insert_with(|| {
                EnrichmentRecord::placeholder(
                    name,
                    component_type.clone(),
                    EnrichmentStatus::NotProcessed,
                )
            });
        }
        Self { records }
    }

    /// Insert `SKIPPED` records for markers that have no record yet.
    pub fn add_skipped(&mut self, skips: &BTreeSet<SkipMarker>) {
        for skip in skips {
            if skip.component_name.is_empty() || self.records.contains_key(&skip.component_name) {
                continue;
            }
            self.records.insert(
                skip.component_name.clone(),
                EnrichmentRecord::placeholder(
                    skip.component_name.clone(),
                    ComponentType::new(skip.type_name.clone()),
                    EnrichmentStatus::Skipped,
                ),
            );
        }
    }

    /// Set `status` on every existing record named in `skips`.
    pub fn mark_status(&mut self, skips: &BTreeSet<SkipMarker>, status: EnrichmentStatus) {
        for skip in skips {
            if let Some(record) = self.records.get_mut(&skip.component_name) {
                record.status = status;
            }
        }
    }

    /// Fold phase results into matching records.
    ///
    /// Payload, response, and message are replaced wholesale. Status follows
    /// the response unless the record is already `SKIPPED`.
    pub fn merge_results(&mut self, results: Vec<EnrichmentRecord>) {
        for result in results {
            let Some(record) = self.records.get_mut(&result.component_name) else {
                tracing::debug!(component = %result.component_name, "result without a record");
                continue;
            };
            record.request_body = result.request_body;
            record.message = result.message;
            record.status = merged_status(record.status, result.response.is_some());
            record.response = result.response;
        }
    }

    pub fn get(&self, component_name: &str) -> Option<&EnrichmentRecord> {
        self.records.get(component_name)
    }

    pub(crate) fn get_mut(&mut self, component_name: &str) -> Option<&mut EnrichmentRecord> {
        self.records.get_mut(component_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view of every record, in name order.
    pub fn snapshot(&self) -> Vec<&EnrichmentRecord> {
        self.records.values().collect()
    }
}

/// Skipped wins: a `SKIPPED` record keeps its status whatever the result.
fn merged_status(current: EnrichmentStatus, has_response: bool) -> EnrichmentStatus {
    if current == EnrichmentStatus::Skipped {
        return EnrichmentStatus::Skipped;
    }
    if has_response {
        EnrichmentStatus::Success
    } else {
        EnrichmentStatus::Fail
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
