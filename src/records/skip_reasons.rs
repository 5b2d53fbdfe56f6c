//! Diagnostic reasons for skipped records.
use super::ledger::EnrichmentLedger;
use super::types::EnrichmentStatus;
use crate::component::registry::LIGHTNING_COMPONENT_BUNDLE;
use crate::component::{Component, SkipMarker};
use crate::messages;
use std::collections::{BTreeSet, HashMap};

/// Why a component was excluded from enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    UnsupportedType,
    ConfigurationNotFound,
    Unknown,
}

impl SkipReason {
    pub fn message(&self) -> &'static str {
        match self {
            SkipReason::NotFound => messages::COMPONENT_NOT_FOUND,
            SkipReason::UnsupportedType => messages::LWC_ONLY,
            SkipReason::ConfigurationNotFound => messages::LWC_CONFIGURATION_NOT_FOUND,
            SkipReason::Unknown => messages::UNKNOWN_SKIP,
        }
    }
}

/// Classify a skipped component against what was discovered under its name.
pub fn classify(discovered: Option<&Component>) -> SkipReason {
    let Some(component) = discovered else {
        return SkipReason::NotFound;
    };
    if component.type_name() != Some(LIGHTNING_COMPONENT_BUNDLE) {
        return SkipReason::UnsupportedType;
    }
    if component.xml.is_none() {
        return SkipReason::ConfigurationNotFound;
    }
    SkipReason::Unknown
}

/// Give every skipped, still-unannotated record named in `skips` a reason.
///
/// Messages that are already set are left alone, so repeated calls are
/// no-ops.
pub fn annotate_skip_reasons(
    skips: &BTreeSet<SkipMarker>,
    discovered: &[Component],
    ledger: &mut EnrichmentLedger,
) {
    let by_name: HashMap<&str, &Component> = discovered
        .iter()
        .filter_map(|component| Some((component.addressable_name()?, component)))
        .collect();

    for skip in skips {
        if skip.component_name.is_empty() {
            continue;
        }
        let Some(record) = ledger.get_mut(&skip.component_name) else {
            continue;
        };
        if record.status != EnrichmentStatus::Skipped || record.message.is_some() {
            continue;
        }
        let reason = classify(by_name.get(skip.component_name.as_str()).copied());
        if reason == SkipReason::Unknown {
            tracing::warn!(
                component = %skip,
                "skipped component is eligible; skip set is inconsistent with discovered components"
            );
        }
        record.message = Some(reason.message().to_string());
    }
}

#[cfg(test)]
#[path = "skip_reasons_tests.rs"]
mod tests;
