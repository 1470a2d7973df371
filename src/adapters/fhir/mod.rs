//! FHIR REST adapter
//!
//! - [`query`] - search URL construction
//! - [`transport`] - the [`Transport`] seam and its `reqwest` implementation
//! - [`models`] - Bundle wire models
//! - [`client`] - the [`FhirClient`] facade

pub mod client;
pub mod models;
pub mod query;
pub mod transport;

pub use client::FhirClient;
pub use models::{Bundle, BundleEntry, BundleLink, RawEntry};
pub use query::Query;
pub use transport::{HttpResponse, HttpTransport, Transport};
