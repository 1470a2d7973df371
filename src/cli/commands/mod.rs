//! CLI command implementations
//!
//! Commands return the process exit code:
//! - 0: success
//! - 2: configuration error
//! - 4: connection or server error
//! - 5: fatal error

pub mod capabilities;
pub mod init;
pub mod list;
pub mod observations;
pub mod patients;
pub mod validate;

use crate::adapters::fhir::FhirClient;
use crate::config::{load_config, FetchConfig, ServerConfig};
use crate::domain::{AnyResource, FetchError, FhirError};
use clap::Args;
use std::path::Path;

/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code when the server could not be reached or refused the request
pub const EXIT_CONNECTION: i32 = 4;
/// Exit code for everything else
pub const EXIT_FATAL: i32 = 5;

/// Where to find the FHIR server
#[derive(Debug, Clone, Copy)]
pub struct Connection<'a> {
    /// Path to the configuration file
    pub config_path: &'a str,
    /// `--base-url` override
    pub base_url: Option<&'a str>,
}

impl Connection<'_> {
    /// Resolve the effective configuration
    ///
    /// A present configuration file is loaded and `--base-url` overrides its
    /// server. Without a file, `--base-url` alone is enough and every other
    /// setting takes its default.
    pub fn resolve(&self) -> crate::domain::Result<FetchConfig> {
        if Path::new(self.config_path).exists() {
            let mut config = load_config(self.config_path)?;
            if let Some(base_url) = self.base_url {
                config.server.base_url = base_url.to_string();
                config.validate().map_err(FetchError::Configuration)?;
            }
            return Ok(config);
        }

        let base_url = self.base_url.ok_or_else(|| {
            FetchError::Configuration(format!(
                "Configuration file not found: {} (pass --base-url to run without one)",
                self.config_path
            ))
        })?;

        let config = FetchConfig {
            application: Default::default(),
            environment: Default::default(),
            server: ServerConfig::new(base_url),
            pagination: Default::default(),
            logging: Default::default(),
        };
        config.validate().map_err(FetchError::Configuration)?;
        Ok(config)
    }

    /// Build a client, reporting failures on stderr
    ///
    /// On failure the error carries the exit code to return.
    pub fn client(&self) -> Result<FhirClient, i32> {
        let config = self.resolve().map_err(|e| {
            eprintln!("❌ Failed to load configuration");
            eprintln!("   Error: {e}");
            EXIT_CONFIG
        })?;

        FhirClient::from_config(&config).map_err(|e| {
            eprintln!("❌ Failed to create FHIR client");
            eprintln!("   Error: {e}");
            exit_code_for(&e)
        })
    }
}

/// Exit code matching an error
pub fn exit_code_for(error: &FetchError) -> i32 {
    match error {
        FetchError::Configuration(_) => EXIT_CONFIG,
        FetchError::Fhir(FhirError::ConnectionFailed(_) | FhirError::RequestFailed { .. }) => {
            EXIT_CONNECTION
        }
        _ => EXIT_FATAL,
    }
}

/// Output options shared by commands that print resources
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print raw resources as a JSON array instead of one line per resource
    #[arg(long)]
    pub json: bool,
}

impl OutputArgs {
    /// Print resources to stdout
    pub fn print(&self, resources: &[AnyResource]) -> anyhow::Result<()> {
        if self.json {
            let raw: Vec<_> = resources.iter().map(|r| r.resource().raw()).collect();
            println!("{}", serde_json::to_string_pretty(&raw)?);
        } else {
            for resource in resources {
                println!("{}", render_line(resource));
            }
        }
        Ok(())
    }
}

/// One human readable line: `Type/id  display`
pub fn render_line(resource: &AnyResource) -> String {
    format!(
        "{}/{}\t{}",
        resource.resource_type(),
        resource.id().unwrap_or("-"),
        resource
    )
}

/// Report a failed operation and pick its exit code
pub(crate) fn report_failure(what: &str, error: &FetchError) -> i32 {
    tracing::error!(error = %error, operation = what, "Command failed");
    eprintln!("❌ {what} failed");
    eprintln!("   Error: {error}");
    exit_code_for(error)
}
