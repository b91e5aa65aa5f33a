//! Integration tests for logging functionality

use ade_bridge::config::LoggingConfig;
use ade_bridge::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_rejected() {
    assert!(init_logging("verbose", &LoggingConfig::default()).is_err());
}

#[test]
fn test_invalid_rotation_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        local_enabled: true,
        local_path: temp_dir.path().to_string_lossy().to_string(),
        local_rotation: "weekly".to_string(),
    };
    assert!(init_logging("info", &config).is_err());
}

// The global subscriber can be installed once per process
#[test]
fn test_file_logging_creates_rolling_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "daily".to_string(),
    };

    let guard = init_logging("info", &config).expect("Failed to initialize logging");
    tracing::info!(target: "ade_bridge", "integration test event");
    drop(guard);

    let files: Vec<String> = std::fs::read_dir(&log_path)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert!(files.iter().any(|name| name.starts_with("ade-bridge.log")));

    // A second subscriber cannot be installed
    assert!(init_logging("info", &LoggingConfig::default()).is_err());
}
