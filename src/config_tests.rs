use super::{load_config, validate_config, EnrichConfig, DEFAULT_MAX_TOKENS, PROJECT_CONFIG_REL};
use tempfile::TempDir;

fn write_project_config(root: &std::path::Path, contents: &str) {
    let path = root.join(PROJECT_CONFIG_REL);
    std::fs::create_dir_all(path.parent().expect("config parent")).expect("create config dir");
    std::fs::write(path, contents).expect("write config");
}

#[test]
fn defaults_validate() {
    let config = EnrichConfig::default();
    validate_config(&config).expect("default config is valid");
    assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
}

#[test]
fn project_config_fills_missing_fields_with_defaults() {
    let dir = TempDir::new().expect("temp dir");
    write_project_config(dir.path(), r#"{"enricher_command": "enrich-stub --fast"}"#);

    let config = load_config(None, dir.path()).expect("load config");
    assert_eq!(config.enricher_command.as_deref(), Some("enrich-stub --fast"));
    assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    validate_config(&config).expect("config is valid");
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("nope.json");
    let err = load_config(Some(&missing), dir.path()).expect_err("missing config");
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn unknown_fields_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    write_project_config(dir.path(), r#"{"max_tokenz": 10}"#);
    assert!(load_config(None, dir.path()).is_err());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let config = EnrichConfig {
        max_tokens: 0,
        ..EnrichConfig::default()
    };
    assert!(validate_config(&config).is_err());

    let config = EnrichConfig {
        schema_version: 2,
        ..EnrichConfig::default()
    };
    assert!(validate_config(&config).is_err());

    let config = EnrichConfig {
        enrichment_path: "services/enrich".to_string(),
        ..EnrichConfig::default()
    };
    assert!(validate_config(&config).is_err());

    let config = EnrichConfig {
        enricher_command: Some("  ".to_string()),
        ..EnrichConfig::default()
    };
    assert!(validate_config(&config).is_err());
}
