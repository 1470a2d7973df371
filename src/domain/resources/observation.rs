//! Observation resource

use crate::domain::datatypes::{CodeableConcept, Period, Quantity, Reference};
use crate::domain::resource::{FhirObject, FhirResource};
use crate::domain::resource_type::ResourceType;
use crate::domain::schema::ResourceSchema;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Measurement or simple assertion about a patient
#[derive(Debug, Clone)]
pub struct Observation {
    resource: FhirResource,
}

impl FhirObject for Observation {
    const RESOURCE_TYPE: ResourceType = ResourceType::Observation;

    fn schema() -> &'static ResourceSchema {
        static SCHEMA: OnceLock<ResourceSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ResourceSchema::new(ResourceType::Observation)
                .field("identifier", "identifier")
                .field("resource_type", "resourceType")
                .field("id", "id")
                .field("status", "status")
                .field("category", "category")
                .field("code", "code")
                .field("subject", "subject")
                .field("context", "context")
                .field("issued", "issued")
                .field("performer", "performer")
                .choice("value", "value")
                .field("interpretation", "interpretation")
                .field("comment", "comment")
                .field("body_site", "bodySite")
                .field("value_quantity", "valueQuantity")
                .field("method", "method")
                .field("reference_range", "referenceRange")
                .field("component", "component")
                .field("effective_date_time", "effectiveDateTime")
                .field("effective_period", "effectivePeriod")
                .primary("code")
        })
    }

    fn from_resource(resource: FhirResource) -> Self {
        Self { resource }
    }

    fn resource(&self) -> &FhirResource {
        &self.resource
    }
}

impl Observation {
    pub fn status(&self) -> Option<&str> {
        self.resource.attribute_str("status")
    }

    pub fn code(&self) -> Option<CodeableConcept> {
        self.resource.attribute_as("code")
    }

    pub fn subject(&self) -> Option<Reference> {
        self.resource.attribute_as("subject")
    }

    /// `value[x]` as sent, whatever its type
    pub fn value(&self) -> Option<&Value> {
        self.resource.attribute("value")
    }

    pub fn value_quantity(&self) -> Option<Quantity> {
        self.resource.attribute_as("value_quantity")
    }

    pub fn effective_date_time(&self) -> Option<&str> {
        self.resource.attribute_str("effective_date_time")
    }

    pub fn effective_period(&self) -> Option<Period> {
        self.resource.attribute_as("effective_period")
    }

    pub fn issued(&self) -> Option<&str> {
        self.resource.attribute_str("issued")
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code();
        let Some(label) = code.as_ref().and_then(CodeableConcept::label) else {
            return f.write_str("Observation has no code attribute.");
        };

        match self.value_quantity() {
            Some(Quantity {
                value: Some(value),
                unit,
                ..
            }) => write!(f, "{label}: {value} {}", unit.unwrap_or_default()),
            _ => f.write_str(label),
        }
    }
}
