//! Remote enrichment of eligible components.
//!
//! Backends produce exactly one result record per addressable component.
//! Per-component failures come back as records without a response; only
//! backend-level problems (no connection, missing command) are errors.
use crate::component::Component;
use crate::config::EnrichConfig;
use crate::records::{
    ContentBundle, EnrichmentRecord, EnrichmentRequestBody, EnrichmentResponse, EnrichmentStatus,
};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;

mod command;
mod http;

pub use command::CommandEnricher;
pub use http::{Connection, HttpEnricher};

/// Produces descriptions for a batch of components.
pub trait Enricher {
    /// Short backend label for logs.
    fn name(&self) -> &'static str;

    /// Enrich every component, returning one result per addressable
    /// component.
    fn enrich(&self, components: &[Component]) -> Result<Vec<EnrichmentRecord>>;
}

/// Pick the backend: a configured command wins over the HTTP service.
pub fn enricher_from_config(config: &EnrichConfig) -> Result<Box<dyn Enricher>> {
    if let Some(command) = config.enricher_command.as_deref() {
        return Ok(Box::new(CommandEnricher::new(command, config.max_tokens)?));
    }
    let connection = Connection::from_config(config)?;
    Ok(Box::new(HttpEnricher::new(connection, config)))
}

/// Build the request payload from a component's source files.
pub fn build_request(component: &Component, max_tokens: u32) -> Result<EnrichmentRequestBody> {
    let name = component.addressable_name().unwrap_or_default();
    let mut files = BTreeMap::new();
    for file in &component.content {
        let bytes = fs::read(&file.path).with_context(|| format!("read {}", file.path.display()))?;
        files.insert(file.name.clone(), String::from_utf8_lossy(&bytes).into_owned());
    }
    Ok(EnrichmentRequestBody {
        content_bundles: vec![ContentBundle {
            resource_name: name.to_string(),
            files,
        }],
        metadata_type: component.type_name().unwrap_or_default().to_string(),
        max_tokens,
    })
}

/// Run `call` for each addressable component and fold the outcome into a
/// result record.
pub(crate) fn enrich_each<F>(
    components: &[Component],
    max_tokens: u32,
    mut call: F,
) -> Vec<EnrichmentRecord>
where
    F: FnMut(&str, &EnrichmentRequestBody) -> Result<EnrichmentResponse>,
{
    let mut results = Vec::new();
    for component in components {
        let (Some(name), Some(component_type)) =
            (component.addressable_name(), component.component_type.as_ref())
        else {
            continue;
        };
        let mut record =
            EnrichmentRecord::placeholder(name, component_type.clone(), EnrichmentStatus::Fail);
        let request = match build_request(component, max_tokens) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(
                    component = name,
                    error = %format!("{err:#}"),
                    "request build failed"
                );
                record.message = Some(format!("Failed to read component source: {err:#}"));
                results.push(record);
                continue;
            }
        };
        match call(name, &request) {
            Ok(response) => {
                tracing::debug!(component = name, "enriched");
                record.response = Some(response);
                record.status = EnrichmentStatus::Success;
            }
            Err(err) => {
                tracing::debug!(
                    component = name,
                    error = %format!("{err:#}"),
                    "enrichment failed"
                );
                record.message = Some(format!("Enrichment failed: {err:#}"));
            }
        }
        record.request_body = request;
        results.push(record);
    }
    results
}

#[cfg(test)]
#[path = "enrichment_tests.rs"]
mod tests;
