//! Integration tests for configuration loading and validation
//!
//! Tests that touch environment variables hold ENV_MUTEX so they do not
//! interfere with each other.

use fhir_fetch::config::{load_config, AuthType, Environment};
use fhir_fetch::domain::FetchError;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for var in [
        "FHIR_FETCH_APPLICATION_LOG_LEVEL",
        "FHIR_FETCH_ENVIRONMENT",
        "FHIR_FETCH_SERVER_BASE_URL",
        "FHIR_FETCH_SERVER_TLS_VERIFY",
        "FHIR_FETCH_PAGINATION_MAX_PAGES",
        "FHIR_FETCH_PAGINATION_PAGE_SIZE",
        "TEST_FHIR_TOKEN",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
environment = "staging"

[application]
log_level = "debug"

[server]
base_url = "https://fhir.example.org/r4"
auth_type = "basic"
username = "fetcher"
password = "pa55"
tls_verify = false
timeout_seconds = 15

[pagination]
max_pages = 50
page_size = 200

[logging]
local_enabled = true
local_path = "/tmp/fhir-fetch"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.environment, Environment::Staging);
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.server.auth_type, AuthType::Basic);
    assert_eq!(config.server.username.as_deref(), Some("fetcher"));
    assert_eq!(
        config.server.password.as_ref().unwrap().expose_secret().as_ref(),
        "pa55"
    );
    assert!(!config.server.tls_verify);
    assert_eq!(config.server.timeout_seconds, 15);
    assert_eq!(config.pagination.max_pages, 50);
    assert_eq!(config.pagination.page_size, Some(200));
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[server]\nbase_url = \"http://localhost:8080/fhir\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.server.auth_type, AuthType::None);
    assert!(config.server.tls_verify);
    assert_eq!(config.server.timeout_seconds, 60);
    assert_eq!(config.pagination.max_pages, 1000);
    assert!(config.pagination.page_size.is_none());
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_FHIR_TOKEN", "substituted-token");

    let file = write_config(
        r#"
[server]
base_url = "https://fhir.example.org/r4"
auth_type = "bearer"
token = "${TEST_FHIR_TOKEN}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config.server.token.as_ref().unwrap().expose_secret().as_ref(),
        "substituted-token"
    );

    cleanup_env_vars();
}

#[test]
fn test_env_var_substitution_missing() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[server]
base_url = "https://fhir.example.org/r4"
auth_type = "bearer"
token = "${TEST_FHIR_TOKEN}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, FetchError::Configuration(_)));
    assert!(err.to_string().contains("TEST_FHIR_TOKEN"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("FHIR_FETCH_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("FHIR_FETCH_SERVER_BASE_URL", "http://override.example/fhir");
    std::env::set_var("FHIR_FETCH_PAGINATION_MAX_PAGES", "7");
    std::env::set_var("FHIR_FETCH_PAGINATION_PAGE_SIZE", "25");

    let file = write_config("[server]\nbase_url = \"http://localhost:8080/fhir\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.server.base_url, "http://override.example/fhir");
    assert_eq!(config.pagination.max_pages, 7);
    assert_eq!(config.pagination.page_size, Some(25));

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_value() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("FHIR_FETCH_PAGINATION_MAX_PAGES", "many");

    let file = write_config("[server]\nbase_url = \"http://localhost:8080/fhir\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("FHIR_FETCH_PAGINATION_MAX_PAGES"));

    cleanup_env_vars();
}

#[test]
fn test_production_requires_tls_verification() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
environment = "production"

[server]
base_url = "https://fhir.example.org/r4"
tls_verify = false
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TLS certificate verification"));
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[server]
base_url = "http://localhost:8080/fhir"

[pagination]
page_size = 5000
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("page_size"));
}
