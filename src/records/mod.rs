//! Enrichment outcome records.
//!
//! The ledger holds one record per component name and reconciles results
//! from each phase; skip reasons are resolved against it before enrichment.
mod ledger;
mod skip_reasons;
mod types;

pub use ledger::EnrichmentLedger;
pub use skip_reasons::annotate_skip_reasons;
pub use types::*;
