//! Configuration system tests
//!
//! Tests for config paths and engine config loading.

use tabview::config_paths;
use tabview::{Delimiter, EngineConfig};
use tempfile::tempdir;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("tabview"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_inside_config_dir() {
    if let (Some(logs), Some(config)) = (config_paths::logs_dir(), config_paths::config_dir()) {
        assert!(logs.starts_with(config));
        assert!(logs.ends_with("logs"));
    }
}

// ========================================================================
// EngineConfig Tests
// ========================================================================

#[test]
fn test_yaml_file_configures_engine() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        r##"
debounce_ms: 120
limits:
  row_limit: 500
  column_limit: 12
render:
  virtual_scroll_threshold: 40
  theme:
    background: "#000000"
"##,
    )
    .unwrap();

    let config = EngineConfig::load_from(&path);
    assert_eq!(config.debounce_ms, 120);
    assert_eq!(config.limits.row_limit, Some(500));
    assert_eq!(config.limits.column_limit, Some(12));
    assert_eq!(config.limits.max_cell_length, 10_000);
    assert_eq!(config.render.virtual_scroll_threshold, 40);
    assert_eq!(config.render.max_rendered_rows, 2000);
    assert_eq!(config.render.theme.background, "#000000");
}

#[test]
fn test_saved_config_is_readable_yaml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    EngineConfig::default().save_to(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("debounce_ms: 300"));
    assert!(text.contains("max_file_size_bytes: 52428800"));
}

#[test]
fn test_delimiter_names_in_yaml() {
    let delimiter: Delimiter = serde_yaml::from_str("semicolon").unwrap();
    assert_eq!(delimiter, Delimiter::Semicolon);
    assert_eq!(serde_yaml::to_string(&Delimiter::Tab).unwrap().trim(), "tab");
}
