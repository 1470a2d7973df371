//! Configuration management for fhir-fetch.
//!
//! TOML configuration files with `${VAR_NAME}` substitution, `FHIR_FETCH_*`
//! environment overrides, defaults for every optional setting and
//! validation on load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fhir_fetch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("fhir-fetch.toml")?;
//! println!("FHIR server: {}", config.server.base_url);
//! println!("Page ceiling: {}", config.pagination.max_pages);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "development"
//!
//! [application]
//! log_level = "info"
//!
//! [server]
//! base_url = "http://hapi.fhir.org/baseR4"
//! auth_type = "bearer"
//! token = "${FHIR_FETCH_TOKEN}"
//! timeout_seconds = 60
//!
//! [pagination]
//! max_pages = 1000
//! page_size = 50
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, AuthType, Environment, FetchConfig, LoggingConfig, PaginationConfig,
    ServerConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
