//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for fhir-fetch using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use commands::Connection;

/// fhir-fetch - FHIR resource retrieval client
#[derive(Parser, Debug)]
#[command(name = "fhir-fetch")]
#[command(version, about, long_about = None)]
#[command(author = "fhir-fetch Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "fhir-fetch.toml", env = "FHIR_FETCH_CONFIG", global = true)]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FHIR_FETCH_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// FHIR server base URL, overriding the configuration file
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Server location as given on the command line
    pub fn connection(&self) -> Connection<'_> {
        Connection {
            config_path: &self.config,
            base_url: self.base_url.as_deref(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the server's capability statement
    Capabilities(commands::capabilities::CapabilitiesArgs),

    /// List every resource of one type
    List(commands::list::ListArgs),

    /// Find patients by condition or procedure
    Patients(commands::patients::PatientsArgs),

    /// List a patient's observations
    Observations(commands::observations::ObservationsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Run the command and return the process exit code
    pub async fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        match self {
            Commands::Capabilities(args) => args.execute(cli.connection()).await,
            Commands::List(args) => args.execute(cli.connection()).await,
            Commands::Patients(args) => args.execute(cli.connection()).await,
            Commands::Observations(args) => args.execute(cli.connection()).await,
            Commands::ValidateConfig(args) => args.execute(&cli.config).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceType;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["fhir-fetch", "capabilities"]);
        assert_eq!(cli.config, "fhir-fetch.toml");
        assert!(cli.base_url.is_none());
        assert!(matches!(cli.command, Commands::Capabilities(_)));
    }

    #[test]
    fn test_cli_parse_global_options_after_subcommand() {
        let cli = Cli::parse_from([
            "fhir-fetch",
            "list",
            "Observation",
            "--base-url",
            "http://localhost:8080/fhir",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080/fhir"));
        assert_eq!(cli.log_level, Some("debug".to_string()));
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.resource_type, ResourceType::Observation);
                assert!(!args.output.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["fhir-fetch", "list", "Encounter"]).is_err());
    }

    #[test]
    fn test_cli_parse_patients_filter() {
        let cli = Cli::parse_from([
            "fhir-fetch",
            "patients",
            "--condition-code",
            "http://snomed.info/sct|44054006",
            "--json",
        ]);
        match cli.command {
            Commands::Patients(args) => {
                assert_eq!(
                    args.condition_code.as_deref(),
                    Some("http://snomed.info/sct|44054006")
                );
                assert!(args.output.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_patients_filters_are_exclusive() {
        assert!(Cli::try_parse_from([
            "fhir-fetch",
            "patients",
            "--condition-text",
            "diabetes",
            "--procedure-text",
            "colonoscopy",
        ])
        .is_err());
    }

    #[test]
    fn test_cli_parse_observations_requires_patient() {
        assert!(Cli::try_parse_from(["fhir-fetch", "observations"]).is_err());
        let cli = Cli::parse_from(["fhir-fetch", "observations", "--patient", "p1"]);
        assert!(matches!(cli.command, Commands::Observations(_)));
    }

    #[test]
    fn test_cli_parse_validate_config_and_init() {
        let cli = Cli::parse_from(["fhir-fetch", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));

        let cli = Cli::parse_from(["fhir-fetch", "init", "--with-examples"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
