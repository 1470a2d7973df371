//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so file
//! logging is exercised by a single test.

use fhir_fetch::config::LoggingConfig;
use fhir_fetch::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "daily".to_string(),
    };

    let guard = init_logging("info", &config).unwrap();
    assert!(log_path.exists());

    tracing::info!(target: "fhir_fetch", resource_type = "Patient", "search finished");
    drop(guard);

    let contents: String = std::fs::read_dir(&log_path)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("fhir-fetch.log")
        })
        .map(|entry| std::fs::read_to_string(entry.path()).unwrap())
        .collect();

    let line = contents
        .lines()
        .find(|line| line.contains("search finished"))
        .expect("log line written");
    let json: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(json["fields"]["resource_type"], "Patient");

    // A second subscriber cannot be installed
    assert!(init_logging("info", &LoggingConfig::default()).is_err());
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let err = init_logging("chatty", &LoggingConfig::default()).err().unwrap();
    assert!(err.to_string().contains("Invalid log level"));
}
