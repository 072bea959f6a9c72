//! Tests for configuration loading and validation

use keel_infrastructure::config::{AppConfig, ConfigLoader};
use std::io::Write;

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .unwrap();

    assert_eq!(config.environment, "Development");
    assert!(!config.seeding.run_on_boot);
    assert_eq!(config.query.default_page_size, 50);
}

#[test]
fn toml_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keel.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
environment = "Production"

[seeding]
run_on_boot = true

[logging]
level = "debug"
"#
    )
    .unwrap();

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();

    assert_eq!(config.environment, "Production");
    assert!(config.seeding.run_on_boot);
    assert_eq!(config.logging.level, "debug");
    // Untouched sections keep their defaults.
    assert_eq!(config.query.default_page_size, 50);
}

#[test]
fn invalid_values_fail_validation_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keel.toml");
    std::fs::write(&path, "[logging]\nlevel = \"shout\"\n").unwrap();

    let result = ConfigLoader::new().with_config_path(&path).load();
    assert!(result.is_err());
}

#[test]
fn loader_builder_records_path_and_prefix() {
    let loader = ConfigLoader::new()
        .with_config_path("custom.toml")
        .with_env_prefix("KEEL_CUSTOM");

    assert_eq!(
        loader.config_path().map(|p| p.display().to_string()),
        Some("custom.toml".to_string())
    );
}

#[test]
fn default_config_serializes_to_toml() {
    // The surface a generated config file would carry.
    let rendered = toml::to_string_pretty(&AppConfig::default()).unwrap();
    assert!(rendered.contains("environment"));
    assert!(rendered.contains("run_on_boot"));
    assert!(rendered.contains("default_page_size"));
}
