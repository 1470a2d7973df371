//! Typed FHIR resources
//!
//! Each type wraps a [`FhirResource`](crate::domain::resource::FhirResource)
//! built through its own schema. [`AnyResource`] covers the closed set when
//! the type is only known at runtime.

pub mod condition;
pub mod observation;
pub mod patient;
pub mod procedure;

pub use condition::Condition;
pub use observation::Observation;
pub use patient::Patient;
pub use procedure::Procedure;

use super::datatypes::Reference;
use super::errors::FhirError;
use super::resource::{FhirObject, FhirResource};
use super::resource_type::ResourceType;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Resources that point at the patient they are about
pub trait HasSubject {
    fn subject(&self) -> Option<Reference>;
}

impl HasSubject for Condition {
    fn subject(&self) -> Option<Reference> {
        Condition::subject(self)
    }
}

impl HasSubject for Observation {
    fn subject(&self) -> Option<Reference> {
        Observation::subject(self)
    }
}

impl HasSubject for Procedure {
    fn subject(&self) -> Option<Reference> {
        Procedure::subject(self)
    }
}

/// Any of the supported typed resources
#[derive(Debug, Clone)]
pub enum AnyResource {
    Patient(Patient),
    Condition(Condition),
    Observation(Observation),
    Procedure(Procedure),
}

type Builder = fn(Map<String, Value>) -> Result<AnyResource, FhirError>;

fn build_patient(raw: Map<String, Value>) -> Result<AnyResource, FhirError> {
    Patient::from_json(raw).map(AnyResource::Patient)
}

fn build_condition(raw: Map<String, Value>) -> Result<AnyResource, FhirError> {
    Condition::from_json(raw).map(AnyResource::Condition)
}

fn build_observation(raw: Map<String, Value>) -> Result<AnyResource, FhirError> {
    Observation::from_json(raw).map(AnyResource::Observation)
}

fn build_procedure(raw: Map<String, Value>) -> Result<AnyResource, FhirError> {
    Procedure::from_json(raw).map(AnyResource::Procedure)
}

/// Dispatch table keyed by resource type
const BUILDERS: [(ResourceType, Builder); 4] = [
    (ResourceType::Patient, build_patient),
    (ResourceType::Condition, build_condition),
    (ResourceType::Observation, build_observation),
    (ResourceType::Procedure, build_procedure),
];

impl AnyResource {
    /// Build whichever typed resource the raw `resourceType` names
    ///
    /// # Errors
    ///
    /// Fails when the tag is missing or names a type outside the closed set.
    pub fn from_json(raw: Map<String, Value>) -> Result<Self, FhirError> {
        let tag = raw
            .get("resourceType")
            .and_then(Value::as_str)
            .ok_or_else(|| FhirError::MissingResourceType("a supported type".to_string()))?;
        let resource_type = ResourceType::from_str(tag)?;
        Self::build(resource_type, raw)
    }

    /// Build a resource of an explicitly requested type
    pub fn build(resource_type: ResourceType, raw: Map<String, Value>) -> Result<Self, FhirError> {
        let (_, builder) = BUILDERS
            .iter()
            .find(|(rt, _)| *rt == resource_type)
            .ok_or_else(|| FhirError::UnsupportedResourceType(resource_type.to_string()))?;
        builder(raw)
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource().resource_type()
    }

    pub fn resource(&self) -> &FhirResource {
        match self {
            AnyResource::Patient(r) => r.resource(),
            AnyResource::Condition(r) => r.resource(),
            AnyResource::Observation(r) => r.resource(),
            AnyResource::Procedure(r) => r.resource(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.resource().id()
    }
}

macro_rules! any_resource_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for AnyResource {
                fn from(resource: $variant) -> Self {
                    AnyResource::$variant(resource)
                }
            }
        )*
    };
}

any_resource_from!(Patient, Condition, Observation, Procedure);

impl fmt::Display for AnyResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyResource::Patient(r) => fmt::Display::fmt(r, f),
            AnyResource::Condition(r) => fmt::Display::fmt(r, f),
            AnyResource::Observation(r) => fmt::Display::fmt(r, f),
            AnyResource::Procedure(r) => fmt::Display::fmt(r, f),
        }
    }
}
