//! Logging and observability
//!
//! Structured logging through `tracing`: console output always, plus an
//! optional JSON file with daily or hourly rotation.
//!
//! # Example
//!
//! ```no_run
//! use fhir_fetch::logging::init_logging;
//! use fhir_fetch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Client started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a search against a FHIR endpoint
///
/// # Example
///
/// ```no_run
/// use fhir_fetch::log_search_start;
///
/// log_search_start!("Patient", "http://localhost:8080/baseR4/Patient?_count=50");
/// ```
#[macro_export]
macro_rules! log_search_start {
    ($resource_type:expr, $url:expr) => {
        tracing::info!(
            resource_type = %$resource_type,
            url = %$url,
            "Starting search"
        );
    };
}

/// Log the completion of a search
///
/// # Example
///
/// ```no_run
/// use fhir_fetch::log_search_complete;
/// use std::time::Duration;
///
/// log_search_complete!("Patient", 3, 2, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_search_complete {
    ($resource_type:expr, $count:expr, $pages:expr, $duration:expr) => {
        tracing::info!(
            resource_type = %$resource_type,
            count = $count,
            pages = $pages,
            duration_ms = $duration.as_millis(),
            "Search completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use fhir_fetch::log_error_with_context;
/// use fhir_fetch::domain::FetchError;
///
/// let error = FetchError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log one followed Bundle page
#[macro_export]
macro_rules! log_page_followed {
    ($page:expr, $max_pages:expr, $url:expr) => {
        tracing::debug!(
            page = $page,
            max_pages = $max_pages,
            url = %$url,
            "Following next page"
        );
    };
}
