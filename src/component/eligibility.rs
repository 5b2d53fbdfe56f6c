//! Eligibility filtering for a requested component set.
//!
//! Produces skip markers only; reasons are assigned later against the ledger.
use super::registry::LIGHTNING_COMPONENT_BUNDLE;
use super::{parse_entries, Component, Member, SkipMarker};
use crate::util::display_path;
use std::collections::BTreeSet;
use std::path::Path;

/// Compute the components that must not be sent for enrichment.
///
/// A named entry without a matching discovered component is skipped, as is
/// every discovered component that fails [`is_processable`]. Wildcard
/// entries never count as missing.
pub fn compute_skips(
    discovered: &[Component],
    requested_entries: &[String],
    project_root: Option<&Path>,
) -> BTreeSet<SkipMarker> {
    let mut skips = BTreeSet::new();

    for entry in parse_entries(requested_entries) {
        let Member::Named(name) = &entry.member else {
            continue;
        };
        let found = discovered.iter().any(|component| {
            component.type_name() == Some(entry.type_name.as_str())
                && component.addressable_name() == Some(name.as_str())
        });
        if !found {
            tracing::debug!(
                component = %format!("{}:{name}", entry.type_name),
                "requested component not found"
            );
            skips.insert(SkipMarker::new(entry.type_name.clone(), name.clone()));
        }
    }

    for component in discovered {
        let (Some(name), Some(type_name)) = (component.addressable_name(), component.type_name())
        else {
            continue;
        };
        if is_processable(component) {
            continue;
        }
        tracing::debug!(
            component = %format!("{type_name}:{name}"),
            descriptor = %component
                .xml_path()
                .map(|path| display_path(path, project_root))
                .unwrap_or_default(),
            "component not eligible for enrichment"
        );
        skips.insert(SkipMarker::new(type_name, name));
    }

    skips
}

/// Only LWC bundles with a descriptor can be enriched and written back.
pub fn is_processable(component: &Component) -> bool {
    component.type_name() == Some(LIGHTNING_COMPONENT_BUNDLE) && component.xml.is_some()
}

/// Discovered components that are addressable and not in the skip set.
pub fn eligible_components(
    discovered: &[Component],
    skips: &BTreeSet<SkipMarker>,
) -> Vec<Component> {
    discovered
        .iter()
        .filter(|component| {
            let Some(name) = component.addressable_name() else {
                return false;
            };
            component.type_name().is_some()
                && !skips.iter().any(|skip| skip.component_name == name)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "eligibility_tests.rs"]
mod tests;
