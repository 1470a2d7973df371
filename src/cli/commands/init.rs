//! Init command implementation
//!
//! Writes a starter configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "fhir-fetch.toml")]
    pub output: String,

    /// Include every option with explanatory comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let content = if self.with_examples {
            CONFIG_WITH_EXAMPLES
        } else {
            MINIMAL_CONFIG
        };

        match fs::write(&self.output, content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set server.base_url in {}", self.output);
                println!("  2. Put credentials in .env (FHIR_FETCH_SERVER_TOKEN or FHIR_FETCH_SERVER_PASSWORD)");
                println!("  3. Validate configuration: fhir-fetch validate-config");
                println!("  4. Try it: fhir-fetch capabilities");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

const MINIMAL_CONFIG: &str = r#"# fhir-fetch configuration

environment = "development"

[application]
log_level = "info"

[server]
base_url = "http://hapi.fhir.org/baseR4"
auth_type = "none"

[pagination]
max_pages = 1000
"#;

const CONFIG_WITH_EXAMPLES: &str = r#"# fhir-fetch configuration
#
# Values of the form ${VAR} are read from the environment (or .env).
# Every key can also be overridden with FHIR_FETCH_<SECTION>_<KEY>,
# e.g. FHIR_FETCH_SERVER_BASE_URL.

# development | staging | production
# TLS verification cannot be disabled in production.
environment = "development"

[application]
# trace | debug | info | warn | error
log_level = "info"

[server]
# Service base URL; resource paths are appended to it
base_url = "http://hapi.fhir.org/baseR4"

# none | basic | bearer
auth_type = "none"
# username = "fhir_user"
# password = "${FHIR_FETCH_PASSWORD}"
# token = "${FHIR_FETCH_TOKEN}"

tls_verify = true
timeout_seconds = 60

[pagination]
# Searches following more next links than this fail instead of looping
max_pages = 1000
# Sent as _count; leave unset to use the server default
# page_size = 50

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
# daily | hourly
local_rotation = "daily"
"#;
