//! Write enriched descriptions back into component descriptors.
//!
//! Each descriptor is rewritten atomically through a temp file in the same
//! directory, so a failed write leaves the original untouched.
use crate::component::Component;
use crate::records::{EnrichmentRecord, EnrichmentStatus};
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Update the descriptor of every eligible component whose record carries a
/// response. Returns one result per attempted write; components without a
/// response are not mentioned.
pub fn update_metadata_files(
    eligible: &[Component],
    records: &[&EnrichmentRecord],
) -> Vec<EnrichmentRecord> {
    let by_name: HashMap<&str, &EnrichmentRecord> = records
        .iter()
        .map(|record| (record.component_name.as_str(), *record))
        .collect();

    let patterns = DescriptionPatterns::new();
    let mut results = Vec::new();
    for component in eligible {
        let Some(name) = component.addressable_name() else {
            continue;
        };
        let Some(record) = by_name.get(name).copied() else {
            continue;
        };
        if record.status == EnrichmentStatus::Skipped {
            continue;
        }
        let Some(response) = record.response.as_ref() else {
            continue;
        };

        let mut result = record.clone();
        let outcome = match (&patterns, component.xml_path()) {
            (Err(err), _) => Err(anyhow!("{err:#}")),
            (Ok(_), None) => Err(anyhow!("component has no descriptor file")),
            (Ok(patterns), Some(xml)) => write_description(patterns, xml, &response.description),
        };
        match outcome {
            Ok(()) => {
                tracing::debug!(component = name, "descriptor updated");
                result.message = None;
            }
            Err(err) => {
                tracing::debug!(
                    component = name,
                    error = %format!("{err:#}"),
                    "descriptor update failed"
                );
                result.response = None;
                result.message = Some(format!("Failed to update metadata file: {err:#}"));
            }
        }
        results.push(result);
    }
    results
}

/// Set the `<description>` element of a descriptor file.
///
/// The rewritten file keeps the original's permissions.
pub fn write_description(
    patterns: &DescriptionPatterns,
    xml_path: &Path,
    description: &str,
) -> Result<()> {
    let original =
        fs::read_to_string(xml_path).with_context(|| format!("read {}", xml_path.display()))?;
    let updated = patterns.set_description(&original, description)?;
    if updated == original {
        return Ok(());
    }
    let permissions = fs::metadata(xml_path)
        .with_context(|| format!("stat {}", xml_path.display()))?
        .permissions();
    let parent = xml_path
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", xml_path.display()))?;
    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    temp.write_all(updated.as_bytes())
        .with_context(|| format!("write temp file for {}", xml_path.display()))?;
    temp.as_file()
        .set_permissions(permissions)
        .with_context(|| format!("set permissions for {}", xml_path.display()))?;
    temp.persist(xml_path)
        .with_context(|| format!("replace {}", xml_path.display()))?;
    Ok(())
}

/// Compiled patterns for locating the description element and the root
/// closing tag.
#[derive(Debug)]
pub struct DescriptionPatterns {
    existing: Regex,
    closing: Regex,
}

impl DescriptionPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            existing: Regex::new(r"(?s)<description\s*/>|<description>.*?</description>")
                .context("compile description regex")?,
            closing: Regex::new(r"(?m)(^[ \t]*)?</[A-Za-z][\w:.-]*>\s*\z")
                .context("compile closing tag regex")?,
        })
    }

    /// Replace the first `<description>` element (empty or not), or insert
    /// one before the root closing tag.
    pub fn set_description(&self, xml: &str, description: &str) -> Result<String> {
        let element = format!("<description>{}</description>", escape_xml(description.trim()));
        if self.existing.is_match(xml) {
            return Ok(self
                .existing
                .replace(xml, regex::NoExpand(&element))
                .into_owned());
        }

        let captures = self
            .closing
            .captures(xml)
            .ok_or_else(|| anyhow!("descriptor has no root closing tag"))?;
        let whole = captures
            .get(0)
            .ok_or_else(|| anyhow!("descriptor has no root closing tag"))?;
        let mut updated = String::with_capacity(xml.len() + element.len() + 8);
        updated.push_str(&xml[..whole.start()]);
        match captures.get(1) {
            Some(indent) => {
                updated.push_str(indent.as_str());
                updated.push_str("    ");
                updated.push_str(&element);
                updated.push('\n');
            }
            None => updated.push_str(&element),
        }
        updated.push_str(&xml[whole.start()..]);
        Ok(updated)
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
