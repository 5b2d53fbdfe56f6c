//! Enrichment configuration helpers.
//!
//! Config is loaded from an explicit path, the project, or the user config
//! directory, then overlaid with environment variables.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Current schema version for `config.json`.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;
/// Project-relative config location.
pub const PROJECT_CONFIG_REL: &str = ".mdenrich/config.json";
/// Default enrichment endpoint path on the org instance.
pub const DEFAULT_ENRICHMENT_PATH: &str = "/services/data/v65.0/metadata-enrichment/enrich";
pub const DEFAULT_MAX_TOKENS: u32 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const MAX_TOKENS_LIMIT: u32 = 4096;

pub const ENV_INSTANCE_URL: &str = "MDENRICH_INSTANCE_URL";
pub const ENV_ACCESS_TOKEN: &str = "MDENRICH_ACCESS_TOKEN";
pub const ENV_ENRICHER_COMMAND: &str = "MDENRICH_ENRICHER_COMMAND";

fn default_schema_version() -> u32 {
    CONFIG_SCHEMA_VERSION
}

fn default_enrichment_path() -> String {
    DEFAULT_ENRICHMENT_PATH.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Settings for the enrichment backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrichConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_url: Option<String>,
    #[serde(default = "default_enrichment_path")]
    pub enrichment_path: String,
    /// Local command used instead of the HTTP service when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enricher_command: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            instance_url: None,
            enrichment_path: default_enrichment_path(),
            enricher_command: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Resolve the config file to use, if any.
///
/// An explicit path must exist; the project and user locations are optional.
pub fn config_path(explicit: Option<&Path>, project_root: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(anyhow!("config file {} does not exist", path.display()));
        }
        return Ok(Some(path.to_path_buf()));
    }
    let project_config = project_root.join(PROJECT_CONFIG_REL);
    if project_config.is_file() {
        return Ok(Some(project_config));
    }
    Ok(dirs::config_dir()
        .map(|dir| dir.join("mdenrich").join("config.json"))
        .filter(|path| path.is_file()))
}

/// Load the config from disk, falling back to defaults when none exists.
pub fn load_config(explicit: Option<&Path>, project_root: &Path) -> Result<EnrichConfig> {
    let Some(path) = config_path(explicit, project_root)? else {
        tracing::debug!("no config file found; using defaults");
        return Ok(EnrichConfig::default());
    };
    let bytes = fs::read(&path).with_context(|| format!("read config {}", path.display()))?;
    let config: EnrichConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Overlay environment variables onto a loaded config.
pub fn apply_env_overrides(config: &mut EnrichConfig) {
    if let Some(url) = non_empty_env(ENV_INSTANCE_URL) {
        config.instance_url = Some(url);
    }
    if let Some(command) = non_empty_env(ENV_ENRICHER_COMMAND) {
        config.enricher_command = Some(command);
    }
}

/// Validate schema version and value ranges.
pub fn validate_config(config: &EnrichConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if !config.enrichment_path.starts_with('/') {
        return Err(anyhow!(
            "enrichment_path must start with '/' (got {:?})",
            config.enrichment_path
        ));
    }
    if config.max_tokens == 0 || config.max_tokens > MAX_TOKENS_LIMIT {
        return Err(anyhow!(
            "max_tokens must be between 1 and {MAX_TOKENS_LIMIT} (got {})",
            config.max_tokens
        ));
    }
    if config.timeout_secs == 0 {
        return Err(anyhow!("timeout_secs must be positive"));
    }
    if let Some(command) = config.enricher_command.as_deref() {
        if command.trim().is_empty() {
            return Err(anyhow!("enricher_command must be non-empty when set"));
        }
    }
    Ok(())
}

pub(crate) fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
