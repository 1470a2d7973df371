//! Capabilities command implementation
//!
//! Fetches the server's CapabilityStatement from `<base>/metadata`.

use super::{report_failure, Connection};
use clap::Args;
use serde_json::Value;

/// Arguments for the capabilities command
#[derive(Args, Debug)]
pub struct CapabilitiesArgs {
    /// Print the full CapabilityStatement as JSON
    #[arg(long)]
    pub json: bool,
}

impl CapabilitiesArgs {
    /// Execute the capabilities command
    pub async fn execute(&self, connection: Connection<'_>) -> anyhow::Result<i32> {
        let client = match connection.client() {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        tracing::info!(base_url = %client.base_url(), "Fetching capability statement");

        let statement = match client.get_capability_statement().await {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Fetching the capability statement", &e)),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&statement)?);
            return Ok(0);
        }

        for line in summarize(&statement) {
            println!("{line}");
        }
        Ok(0)
    }
}

/// Short human readable summary of a CapabilityStatement
pub fn summarize(statement: &Value) -> Vec<String> {
    let text = |v: &Value| v.as_str().unwrap_or("unknown").to_string();

    let mut lines = vec![
        format!("Server: {}", text(&statement["software"]["name"])),
        format!("Version: {}", text(&statement["software"]["version"])),
        format!("FHIR version: {}", text(&statement["fhirVersion"])),
    ];

    let resources: Vec<&str> = statement["rest"]
        .as_array()
        .into_iter()
        .flatten()
        .flat_map(|rest| rest["resource"].as_array().into_iter().flatten())
        .filter_map(|r| r["type"].as_str())
        .collect();
    lines.push(format!("Resource types: {}", resources.len()));

    lines
}
