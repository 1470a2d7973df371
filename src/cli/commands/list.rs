//! List command implementation

use super::{report_failure, Connection, OutputArgs};
use crate::domain::ResourceType;
use clap::Args;
use std::str::FromStr;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Resource type (Patient, Condition, Observation, Procedure)
    #[arg(value_parser = parse_resource_type)]
    pub resource_type: ResourceType,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn parse_resource_type(s: &str) -> Result<ResourceType, String> {
    ResourceType::from_str(s).map_err(|e| e.to_string())
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, connection: Connection<'_>) -> anyhow::Result<i32> {
        let client = match connection.client() {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let resources = match client.get_all(self.resource_type).await {
            Ok(r) => r,
            Err(e) => return Ok(report_failure(&format!("Listing {}", self.resource_type), &e)),
        };

        self.output.print(&resources)?;
        eprintln!("✅ {} {} resource(s)", resources.len(), self.resource_type);
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_type() {
        assert_eq!(parse_resource_type("Condition"), Ok(ResourceType::Condition));
        assert!(parse_resource_type("Encounter").is_err());
    }
}
