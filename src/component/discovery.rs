//! Source discovery for requested components.
//!
//! Walks each package directory, recognises components by the registry
//! directory they sit in, and keeps the ones selected by a requested entry.
use super::registry::{self, Layout, TypeDefinition};
use super::{parse_entries, Component, ContentFile};
use crate::project::Project;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const TESTS_DIR: &str = "__tests__";

/// Discover components under the project's package directories that match
/// any of `requested_entries`, sorted by type then name.
pub fn discover_components(
    project: &Project,
    requested_entries: &[String],
) -> Result<Vec<Component>> {
    let entries = parse_entries(requested_entries);
    let mut found = Vec::new();
    for package_dir in project.package_dirs() {
        if !package_dir.is_dir() {
            tracing::warn!(path = %package_dir.display(), "package directory missing");
            continue;
        }
        walk(&package_dir, &mut found)?;
    }

    let mut selected: Vec<Component> = found
        .into_iter()
        .filter(|component| {
            let (Some(type_name), Some(name)) =
                (component.type_name(), component.addressable_name())
            else {
                return false;
            };
            entries.iter().any(|entry| entry.matches(type_name, name))
        })
        .collect();
    selected.sort_by(|a, b| {
        (a.type_name(), a.addressable_name()).cmp(&(b.type_name(), b.addressable_name()))
    });
    tracing::debug!(count = selected.len(), "discovered components");
    Ok(selected)
}

fn walk(dir: &Path, found: &mut Vec<Component>) -> Result<()> {
    for path in sorted_children(dir)? {
        if !path.is_dir() || is_hidden(&path) {
            continue;
        }
        let dir_name = file_name(&path);
        if let Some(definition) = registry::by_directory(&dir_name) {
            collect_type(definition, &path, found)?;
        } else {
            walk(&path, found)?;
        }
    }
    Ok(())
}

fn collect_type(
    definition: &TypeDefinition,
    type_dir: &Path,
    found: &mut Vec<Component>,
) -> Result<()> {
    for path in sorted_children(type_dir)? {
        if is_hidden(&path) {
            continue;
        }
        let component = match definition.layout {
            Layout::Bundle => {
                if !path.is_dir() {
                    continue;
                }
                bundle_component(definition, &path)?
            }
            Layout::File { extension } => {
                if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                let descriptor = path.with_file_name(definition.descriptor_file_name(name));
                let source = ContentFile {
                    name: file_name(&path),
                    path: path.clone(),
                };
                let mut component =
                    Component::new(definition.name, name).with_content(vec![source]);
                if descriptor.is_file() {
                    component = component.with_xml(descriptor);
                }
                component
            }
            Layout::DescriptorOnly => {
                let file = file_name(&path);
                let Some(name) = file.strip_suffix(definition.descriptor_suffix) else {
                    continue;
                };
                Component::new(definition.name, name).with_xml(path.clone())
            }
        };
        found.push(component);
    }
    Ok(())
}

fn bundle_component(definition: &TypeDefinition, bundle_dir: &Path) -> Result<Component> {
    let name = file_name(bundle_dir);
    let mut content = Vec::new();
    collect_bundle_files(bundle_dir, bundle_dir, &mut content)?;
    let descriptor = bundle_dir.join(definition.descriptor_file_name(&name));
    let mut component = Component::new(definition.name, &name).with_content(content);
    if descriptor.is_file() {
        component = component.with_xml(descriptor);
    }
    Ok(component)
}

fn collect_bundle_files(root: &Path, dir: &Path, content: &mut Vec<ContentFile>) -> Result<()> {
    for path in sorted_children(dir)? {
        if is_hidden(&path) {
            continue;
        }
        if path.is_dir() {
            if file_name(&path) != TESTS_DIR {
                collect_bundle_files(root, &path, content)?;
            }
            continue;
        }
        let rel = path
            .strip_prefix(root)
            .context("strip bundle prefix")?
            .components()
            .map(|part| part.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        content.push(ContentFile { name: rel, path });
    }
    Ok(())
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        children.push(entry.path());
    }
    children.sort();
    Ok(children)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_hidden(path: &Path) -> bool {
    file_name(path).starts_with('.')
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
