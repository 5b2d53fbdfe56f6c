//! Record and payload types shared by the ledger and the enrichment backends.
//!
//! Field names mirror the enrichment service's camelCase JSON.
use crate::component::ComponentType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata type marker used before a real request is built.
pub const PLACEHOLDER_METADATA_TYPE: &str = "Generic";
/// Token bound used before a real request is built.
pub const PLACEHOLDER_MAX_TOKENS: u32 = 50;

/// Outcome of a component across the enrichment phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrichmentStatus {
    NotProcessed,
    Skipped,
    Success,
    Fail,
}

impl EnrichmentStatus {
    /// Return the stable string identifier used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichmentStatus::NotProcessed => "NOT_PROCESSED",
            EnrichmentStatus::Skipped => "SKIPPED",
            EnrichmentStatus::Success => "SUCCESS",
            EnrichmentStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for EnrichmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source files of one component, keyed by bundle-relative name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBundle {
    pub resource_name: String,
    pub files: BTreeMap<String, String>,
}

/// Payload sent to the enrichment service for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRequestBody {
    pub content_bundles: Vec<ContentBundle>,
    pub metadata_type: String,
    pub max_tokens: u32,
}

impl EnrichmentRequestBody {
    pub fn placeholder() -> Self {
        Self {
            content_bundles: Vec::new(),
            metadata_type: PLACEHOLDER_METADATA_TYPE.to_string(),
            max_tokens: PLACEHOLDER_MAX_TOKENS,
        }
    }
}

/// Successful enrichment payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResponse {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_source: Option<String>,
}

/// Per-component record; also the shape phase results come back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRecord {
    pub component_name: String,
    pub component_type: ComponentType,
    pub request_body: EnrichmentRequestBody,
    pub response: Option<EnrichmentResponse>,
    pub message: Option<String>,
    pub status: EnrichmentStatus,
}

impl EnrichmentRecord {
    /// Fresh record with a placeholder request and no outcome.
    pub fn placeholder(
        component_name: impl Into<String>,
        component_type: ComponentType,
        status: EnrichmentStatus,
    ) -> Self {
        Self {
            component_name: component_name.into(),
            component_type,
            request_body: EnrichmentRequestBody::placeholder(),
            response: None,
            message: None,
            status,
        }
    }
}
