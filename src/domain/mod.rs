//! Domain models and types for fhir-fetch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Resource type tags** ([`ResourceType`])
//! - **Schema-driven generic resources** ([`ResourceSchema`], [`FhirResource`])
//! - **Typed resources** ([`Patient`], [`Condition`], [`Observation`], [`Procedure`])
//! - **Error types** ([`FetchError`], [`FhirError`])
//! - **Result type alias** ([`Result`])
//!
//! # Typed Resources
//!
//! Typed resources are built from raw JSON objects and refuse any object
//! whose `resourceType` differs from their own:
//!
//! ```rust
//! use fhir_fetch::domain::{FhirObject, Patient};
//! use serde_json::json;
//!
//! let patient = Patient::from_value(json!({
//!     "resourceType": "Patient",
//!     "gender": "female",
//!     "name": [{"text": "Jane Doe"}]
//! })).unwrap();
//! assert_eq!(patient.gender(), Some("female"));
//! assert_eq!(patient.to_string(), "Jane Doe");
//!
//! assert!(Patient::from_value(json!({"resourceType": "Observation"})).is_err());
//! ```

pub mod datatypes;
pub mod errors;
pub mod resource;
pub mod resource_type;
pub mod resources;
pub mod result;
pub mod schema;

// Re-export commonly used types for convenience
pub use datatypes::{CodeableConcept, Coding, HumanName, Period, Quantity, Reference};
pub use errors::{FetchError, FhirError};
pub use resource::{FhirObject, FhirResource};
pub use resource_type::ResourceType;
pub use resources::{AnyResource, Condition, HasSubject, Observation, Patient, Procedure};
pub use result::Result;
pub use schema::{AttributeSpec, ExtractionRule, ResourceSchema};
