//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AuthType, Environment, FetchConfig};
use super::secret::secret_string;
use crate::domain::errors::FetchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FetchConfig
/// 4. Applies environment variable overrides (FHIR_FETCH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`FetchError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, TOML parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use fhir_fetch::config::loader::load_config;
///
/// let config = load_config("fhir-fetch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FetchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FetchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FetchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text as [`load_config`] does, without touching the filesystem
pub fn parse_config(contents: &str) -> Result<FetchConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: FetchConfig = toml::from_str(&contents)
        .map_err(|e| FetchError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        FetchError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched. Every unset variable is
/// reported at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FetchError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FetchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| {
        FetchError::Configuration(format!("Invalid value '{raw}' for environment variable {name}"))
    })
}

/// Applies environment variable overrides using FHIR_FETCH_* prefix
///
/// Environment variables follow the pattern FHIR_FETCH_<SECTION>_<KEY>,
/// for example FHIR_FETCH_SERVER_BASE_URL.
fn apply_env_overrides(config: &mut FetchConfig) -> Result<()> {
    if let Ok(val) = std::env::var("FHIR_FETCH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("FHIR_FETCH_ENVIRONMENT") {
        config.environment = match val.to_lowercase().as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(FetchError::Configuration(format!(
                    "Invalid environment '{other}' in FHIR_FETCH_ENVIRONMENT"
                )))
            }
        };
    }

    // Server overrides
    if let Ok(val) = std::env::var("FHIR_FETCH_SERVER_BASE_URL") {
        config.server.base_url = val;
    }
    if let Ok(val) = std::env::var("FHIR_FETCH_SERVER_AUTH_TYPE") {
        config.server.auth_type = match val.to_lowercase().as_str() {
            "none" => AuthType::None,
            "basic" => AuthType::Basic,
            "bearer" => AuthType::Bearer,
            other => {
                return Err(FetchError::Configuration(format!(
                    "Invalid auth type '{other}' in FHIR_FETCH_SERVER_AUTH_TYPE"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("FHIR_FETCH_SERVER_USERNAME") {
        config.server.username = Some(val);
    }
    if let Ok(val) = std::env::var("FHIR_FETCH_SERVER_PASSWORD") {
        config.server.password = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("FHIR_FETCH_SERVER_TOKEN") {
        config.server.token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("FHIR_FETCH_SERVER_TLS_VERIFY") {
        config.server.tls_verify = parse_env("FHIR_FETCH_SERVER_TLS_VERIFY", &val)?;
    }
    if let Ok(val) = std::env::var("FHIR_FETCH_SERVER_TIMEOUT_SECONDS") {
        config.server.timeout_seconds = parse_env("FHIR_FETCH_SERVER_TIMEOUT_SECONDS", &val)?;
    }

    // Pagination overrides
    if let Ok(val) = std::env::var("FHIR_FETCH_PAGINATION_MAX_PAGES") {
        config.pagination.max_pages = parse_env("FHIR_FETCH_PAGINATION_MAX_PAGES", &val)?;
    }
    if let Ok(val) = std::env::var("FHIR_FETCH_PAGINATION_PAGE_SIZE") {
        config.pagination.page_size = Some(parse_env("FHIR_FETCH_PAGINATION_PAGE_SIZE", &val)?);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("FHIR_FETCH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("FHIR_FETCH_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("FHIR_FETCH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("FHIR_FETCH_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
