//! External system integrations for fhir-fetch.
//!
//! - [`fhir`] - FHIR REST server integration
//!
//! # Design Pattern
//!
//! Adapters isolate network access behind a trait so everything above them
//! can be exercised against in-memory implementations. The FHIR adapter puts
//! that seam at [`fhir::Transport`]:
//!
//! ```rust,no_run
//! use fhir_fetch::adapters::fhir::{FhirClient, HttpTransport};
//! use fhir_fetch::config::{secret_string, AuthType, ServerConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut server = ServerConfig::new("https://fhir.example.org/r4");
//! server.auth_type = AuthType::Bearer;
//! server.token = Some(secret_string("token".to_string()));
//!
//! let transport = HttpTransport::new(&server)?;
//! let client = FhirClient::with_transport(server.base_url.clone(), Arc::new(transport));
//! let patients = client.get_all_patients().await?;
//! println!("{} patients", patients.len());
//! # Ok(())
//! # }
//! ```

pub mod fhir;
