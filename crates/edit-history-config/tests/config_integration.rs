use edit_history_config::AppConfig;

#[test]
fn test_load_creates_default_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edit-history.json");
    assert!(!path.exists());

    let config = AppConfig::load_or_create(&path);
    assert!(path.exists());
    assert_eq!(config, AppConfig::default());

    // File should contain valid JSON
    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(parsed.is_object());
    assert_eq!(parsed["merge_window_ms"], 1000);
}

#[test]
fn test_load_existing_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edit-history.json");
    let json = r#"{
        "merge_window_ms": 500,
        "max_levels": 200,
        "log_filter": "debug"
    }"#;
    std::fs::write(&path, json).unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.merge_window_ms, 500);
    assert_eq!(config.max_levels, 200);
    assert_eq!(config.log_filter, "debug");
}

#[test]
fn test_broken_json_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edit-history.json");
    std::fs::write(&path, "{ this is not valid json }}}").unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_broken_file_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edit-history.json");
    let broken = "{ \"merge_window_ms\": }";
    std::fs::write(&path, broken).unwrap();

    let _ = AppConfig::load_or_create(&path);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edit-history.json");
    std::fs::write(&path, r#"{"max_levels": 64}"#).unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.max_levels, 64);
    assert_eq!(config.merge_window_ms, 1_000);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn test_loaded_config_is_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edit-history.json");
    std::fs::write(&path, r#"{"merge_window_ms": 999999, "max_levels": 1}"#).unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.merge_window_ms, 60_000);
    assert_eq!(config.max_levels, 2);
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edit-history.json");

    let config = AppConfig {
        merge_window_ms: 1_500,
        max_levels: 300,
        log_filter: "edit_history_engine=trace".to_string(),
    };
    config.save(&path).unwrap();

    let loaded = AppConfig::load_or_create(&path);
    assert_eq!(loaded, config);
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("edit-history.json");

    let err = AppConfig::default().save(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to write config"));
}
