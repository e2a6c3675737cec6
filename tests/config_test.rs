// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置文件读取、缺省值与校验
// ==========================================

use lob_filler::config::{ConfigError, ConfigManager, ConfigSource};
use lob_filler::domain::types::EligibilityPolicy;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_match_documented_values() {
    let manager = ConfigManager::with_defaults();
    let config = manager.config();

    assert_eq!(manager.source(), &ConfigSource::Default);
    assert_eq!(config.eligibility, EligibilityPolicy::BlankOnly);
    assert_eq!(config.marker.date_format, "%m/%d/%y");
    assert_eq!(config.marker.color_for("Sup1"), "#FFD966");
    assert_eq!(config.marker.color_for("Sup2"), "#A4C2F4");
    assert_eq!(config.marker.color_for("Unknown"), "#FFFFFF");
    assert_eq!(config.columns.qty_per_shipset.as_deref(), Some("Qty/SS"));
    assert!(config.report.show_ignored);
    assert_eq!(config.report.ignored_preview_limit, 20);
}

#[test]
fn test_load_explicit_file_with_partial_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "report": { "ignored_preview_limit": 5 } }"#).unwrap();

    let manager = ConfigManager::load(Some(path.as_path())).unwrap();

    assert_eq!(manager.source(), &ConfigSource::File(path.clone()));
    assert_eq!(manager.config().report.ignored_preview_limit, 5);
    assert!(manager.config().report.show_ignored);
    assert_eq!(manager.config().columns.stockcode, "Stockcode");
}

#[test]
fn test_load_explicit_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.json");

    let result = ConfigManager::load(Some(path.as_path()));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_invalid_json_is_parse_error() {
    let result = ConfigManager::from_json_str("{ not json");
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_invalid_date_format_rejected() {
    let result = ConfigManager::from_json_str(r#"{ "marker": { "date_format": "%Q" } }"#);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { ref key, .. }) if key == "marker.date_format"
    ));
}

#[test]
fn test_blank_column_name_rejected() {
    let result = ConfigManager::from_json_str(r#"{ "columns": { "supplier": "  " } }"#);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_snapshot_round_trips_through_loader() {
    let manager = ConfigManager::with_defaults();
    let snapshot = manager.snapshot_json().unwrap();

    let reloaded = ConfigManager::from_json_str(&snapshot).unwrap();
    assert_eq!(reloaded.config(), manager.config());
}
