//! Discovered components, requested entries, and skip markers.
//!
//! A component is addressed by its name; the type travels alongside it so
//! eligibility and skip reasons can be decided without re-reading the
//! project.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod discovery;
pub mod eligibility;
pub mod registry;

pub use discovery::discover_components;
pub use eligibility::compute_skips;

/// Wildcard member name in a requested entry.
pub const WILDCARD: &str = "*";

/// Type descriptor carried by components and records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentType {
    pub name: String,
}

impl ComponentType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A single file shipped with a component's content bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    /// Path relative to the bundle root, with `/` separators.
    pub name: String,
    pub path: PathBuf,
}

/// A component found in project source.
///
/// Name and type are optional because discovery may surface entries it can
/// not fully resolve; those are never recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub component_type: Option<ComponentType>,
    /// Descriptor (`*-meta.xml`) path when one exists.
    pub xml: Option<PathBuf>,
    pub content: Vec<ContentFile>,
}

impl Component {
    pub fn new(type_name: &str, name: &str) -> Self {
        Self {
            full_name: Some(name.to_string()),
            name: Some(name.to_string()),
            component_type: Some(ComponentType::new(type_name)),
            ..Self::default()
        }
    }

    pub fn with_xml(mut self, xml: impl Into<PathBuf>) -> Self {
        self.xml = Some(xml.into());
        self
    }

    pub fn with_content(mut self, content: Vec<ContentFile>) -> Self {
        self.content = content;
        self
    }

    /// Name used as the ledger key: the full name, falling back to the short
    /// name. Empty names are not addressable.
    pub fn addressable_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .or(self.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn type_name(&self) -> Option<&str> {
        self.component_type.as_ref().map(|ty| ty.name.as_str())
    }

    pub fn xml_path(&self) -> Option<&Path> {
        self.xml.as_deref()
    }
}

/// Lightweight (type, name) pair identifying a component excluded from
/// processing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipMarker {
    pub type_name: String,
    pub component_name: String,
}

impl SkipMarker {
    pub fn new(type_name: impl Into<String>, component_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            component_name: component_name.into(),
        }
    }
}

impl fmt::Display for SkipMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name, self.component_name)
    }
}

/// Member selector of a requested entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Wildcard,
    Named(String),
}

/// A parsed `Type:Name`, `Type:*`, or bare `Type` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub type_name: String,
    pub member: Member,
}

impl MetadataEntry {
    /// Parse a requested entry. The type is canonicalised through the
    /// registry; a missing name or `*` selects every component of the type.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (type_part, name_part) = match raw.split_once(':') {
            Some((type_part, name_part)) => (type_part.trim(), name_part.trim()),
            None => (raw, ""),
        };
        if type_part.is_empty() {
            return None;
        }
        let member = if name_part.is_empty() || name_part == WILDCARD {
            Member::Wildcard
        } else {
            Member::Named(name_part.to_string())
        };
        Some(Self {
            type_name: registry::canonical_type_name(type_part),
            member,
        })
    }

    /// Whether a component of `type_name` called `name` is selected.
    pub fn matches(&self, type_name: &str, name: &str) -> bool {
        if self.type_name != type_name {
            return false;
        }
        match &self.member {
            Member::Wildcard => true,
            Member::Named(member) => member == name,
        }
    }
}

/// Parse every entry, dropping ones without a type.
pub fn parse_entries(raw_entries: &[String]) -> Vec<MetadataEntry> {
    raw_entries
        .iter()
        .filter_map(|raw| MetadataEntry::parse(raw))
        .collect()
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
