//! Observations command implementation

use super::{report_failure, Connection, OutputArgs};
use crate::domain::AnyResource;
use clap::Args;

/// Arguments for the observations command
#[derive(Args, Debug)]
pub struct ObservationsArgs {
    /// Logical id of the patient
    #[arg(long)]
    pub patient: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ObservationsArgs {
    /// Execute the observations command
    pub async fn execute(&self, connection: Connection<'_>) -> anyhow::Result<i32> {
        let client = match connection.client() {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let observations = match client.get_observations_by_patient(&self.patient).await {
            Ok(o) => o,
            Err(e) => return Ok(report_failure("Observation search", &e)),
        };

        let resources: Vec<AnyResource> =
            observations.into_iter().map(AnyResource::from).collect();
        self.output.print(&resources)?;
        eprintln!(
            "✅ {} observation(s) for patient {}",
            resources.len(),
            self.patient
        );
        Ok(0)
    }
}
