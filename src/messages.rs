//! User-facing message catalog.
//!
//! Skip reasons and summary labels live here so records and the summary
//! printer agree on wording.

/// No discovered component carries the requested name.
pub const COMPONENT_NOT_FOUND: &str = "Component not found in the project source.";
/// The component exists but is not a Lightning Web Component.
pub const LWC_ONLY: &str =
    "Only Lightning Web Components (LightningComponentBundle) are supported for enrichment.";
/// The component is an LWC bundle without its `.js-meta.xml` descriptor.
pub const LWC_CONFIGURATION_NOT_FOUND: &str =
    "The component's configuration file (.js-meta.xml) was not found.";
/// Fallback for a skip that matches none of the known reasons.
pub const UNKNOWN_SKIP: &str = "Component was skipped for an unknown reason.";

pub const METRICS_TOTAL: &str = "Total components";
pub const METRICS_SUCCESS: &str = "Enriched";
pub const METRICS_SKIPPED: &str = "Skipped";
pub const METRICS_FAIL: &str = "Failed";
pub const METRICS_NOT_PROCESSED: &str = "Not processed";
