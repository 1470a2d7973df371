// fhir-fetch - FHIR resource retrieval client
// Copyright (c) 2025 fhir-fetch Contributors
// Licensed under the MIT License

//! # fhir-fetch - FHIR resource retrieval client
//!
//! fhir-fetch searches a FHIR server over REST, follows Bundle pagination to
//! the end and returns the results as typed Patient, Condition, Observation
//! and Procedure objects.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pagination and mapping of search results
//! - [`adapters`] - FHIR REST integration (query builder, transport, client)
//! - [`domain`] - Typed resources, schemas and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fhir_fetch::adapters::fhir::FhirClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FhirClient::new("http://hapi.fhir.org/baseR4")?;
//!
//!     let patients = client
//!         .get_patients_by_condition_code("http://snomed.info/sct", "44054006")
//!         .await?;
//!
//!     for patient in &patients {
//!         let observations = client.get_observations_for(patient).await?;
//!         println!("{patient}: {} observations", observations.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Searches
//!
//! Any search whose results are one of the supported types can be issued
//! through [`FhirClient::search`](adapters::fhir::FhirClient::search):
//!
//! ```rust,no_run
//! use fhir_fetch::adapters::fhir::{FhirClient, Query};
//! use fhir_fetch::domain::Observation;
//!
//! # async fn example(client: &FhirClient) -> fhir_fetch::domain::Result<()> {
//! let query = Query::new("Observation")
//!     .param("code", "http://loinc.org|29463-7")
//!     .param("_count", "100");
//! let weights: Vec<Observation> = client.search(query).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`domain::Result`]. A failed page aborts the
//! whole search; there are no partial results.
//!
//! ```rust,no_run
//! use fhir_fetch::adapters::fhir::FhirClient;
//!
//! # async fn example(client: &FhirClient) {
//! match client.get_all_patients().await {
//!     Ok(patients) => println!("{} patients", patients.len()),
//!     Err(e) if e.status() == Some(404) => eprintln!("No Patient endpoint"),
//!     Err(e) => eprintln!("Search failed: {e}"),
//! }
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
