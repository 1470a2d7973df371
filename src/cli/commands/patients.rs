//! Patients command implementation
//!
//! Finds patients by the codes or free text of their conditions and
//! procedures. Codes are given as `system|code`.

use super::{report_failure, Connection, OutputArgs, EXIT_CONFIG};
use crate::adapters::fhir::FhirClient;
use crate::domain::{AnyResource, Patient, Result};
use clap::{ArgGroup, Args};

/// Arguments for the patients command
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("filter")
        .args(["condition_code", "condition_text", "procedure_code", "procedure_text"])
        .multiple(false)
))]
pub struct PatientsArgs {
    /// Patients with a condition coded `system|code`
    #[arg(long, value_name = "SYSTEM|CODE")]
    pub condition_code: Option<String>,

    /// Patients with a condition whose code text matches
    #[arg(long)]
    pub condition_text: Option<String>,

    /// Patients with a procedure coded `system|code`
    #[arg(long, value_name = "SYSTEM|CODE")]
    pub procedure_code: Option<String>,

    /// Patients with a procedure whose code text matches
    #[arg(long)]
    pub procedure_text: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Split a `system|code` token
pub fn split_token(token: &str) -> Option<(&str, &str)> {
    let (system, code) = token.split_once('|')?;
    (!code.is_empty()).then_some((system, code))
}

impl PatientsArgs {
    /// Execute the patients command
    pub async fn execute(&self, connection: Connection<'_>) -> anyhow::Result<i32> {
        for token in [&self.condition_code, &self.procedure_code].into_iter().flatten() {
            if split_token(token).is_none() {
                eprintln!("❌ Invalid code '{token}', expected SYSTEM|CODE");
                return Ok(EXIT_CONFIG);
            }
        }

        let client = match connection.client() {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let patients = match self.fetch(&client).await {
            Ok(p) => p,
            Err(e) => return Ok(report_failure("Patient search", &e)),
        };

        let resources: Vec<AnyResource> = patients.into_iter().map(AnyResource::from).collect();
        self.output.print(&resources)?;
        eprintln!("✅ {} patient(s)", resources.len());
        Ok(0)
    }

    async fn fetch(&self, client: &FhirClient) -> Result<Vec<Patient>> {
        if let Some((system, code)) = self.condition_code.as_deref().and_then(split_token) {
            return client.get_patients_by_condition_code(system, code).await;
        }
        if let Some(text) = &self.condition_text {
            return client.get_patients_by_condition_text(text).await;
        }
        if let Some((system, code)) = self.procedure_code.as_deref().and_then(split_token) {
            return client.get_patients_by_procedure_code(system, code).await;
        }
        if let Some(text) = &self.procedure_text {
            return client.get_patients_by_procedure_text(text).await;
        }
        client.get_all_patients().await
    }
}
