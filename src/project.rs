//! Project root resolution from `sfdx-project.json`.
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const PROJECT_FILE: &str = "sfdx-project.json";
const DEFAULT_PACKAGE_DIR: &str = "force-app";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectFile {
    #[serde(default)]
    package_directories: Vec<PackageDirectory>,
}

#[derive(Debug, Deserialize)]
struct PackageDirectory {
    path: String,
}

/// A resolved source project.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    package_dirs: Vec<String>,
}

impl Project {
    /// Resolve the project from an explicit root, or from the nearest
    /// ancestor of the working directory containing `sfdx-project.json`.
    pub fn resolve(project_dir: Option<&Path>) -> Result<Self> {
        let root = match project_dir {
            Some(dir) => {
                if !dir.join(PROJECT_FILE).is_file() {
                    return Err(anyhow!(
                        "{} not found in {}",
                        PROJECT_FILE,
                        dir.display()
                    ));
                }
                dir.to_path_buf()
            }
            None => {
                let cwd = env::current_dir().context("resolve current directory")?;
                find_project_root(&cwd).ok_or_else(|| {
                    anyhow!(
                        "no {} found in {} or any parent directory",
                        PROJECT_FILE,
                        cwd.display()
                    )
                })?
            }
        };
        Self::load(root)
    }

    fn load(root: PathBuf) -> Result<Self> {
        let path = root.join(PROJECT_FILE);
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let file: ProjectFile =
            serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
        let mut package_dirs = Vec::new();
        for dir in file.package_directories {
            let rel = dir.path.trim().trim_end_matches('/').to_string();
            if rel.is_empty() {
                continue;
            }
            if Path::new(&rel).is_absolute() {
                return Err(anyhow!(
                    "package directory must be relative to the project (got {rel:?})"
                ));
            }
            package_dirs.push(rel);
        }
        if package_dirs.is_empty() {
            package_dirs.push(DEFAULT_PACKAGE_DIR.to_string());
        }
        Ok(Self { root, package_dirs })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute package directory paths in declaration order.
    pub fn package_dirs(&self) -> Vec<PathBuf> {
        self.package_dirs
            .iter()
            .map(|rel| self.root.join(rel))
            .collect()
    }
}

fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_FILE).is_file())
        .map(Path::to_path_buf)
}
