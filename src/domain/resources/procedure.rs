//! Procedure resource

use crate::domain::datatypes::{CodeableConcept, Period, Reference};
use crate::domain::resource::{FhirObject, FhirResource};
use crate::domain::resource_type::ResourceType;
use crate::domain::schema::ResourceSchema;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Action performed on or for a patient
#[derive(Debug, Clone)]
pub struct Procedure {
    resource: FhirResource,
}

impl FhirObject for Procedure {
    const RESOURCE_TYPE: ResourceType = ResourceType::Procedure;

    fn schema() -> &'static ResourceSchema {
        static SCHEMA: OnceLock<ResourceSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ResourceSchema::new(ResourceType::Procedure)
                .field("identifier", "identifier")
                .field("resource_type", "resourceType")
                .field("id", "id")
                .field("subject", "subject")
                .field("status", "status")
                .field("not_done", "notDone")
                .field("not_done_reason", "notDoneReason")
                .field("category", "category")
                .field("code", "code")
                .choice("performed", "performed")
                .field("reason_code", "reasonCode")
                .field("body_site", "bodySite")
                .field("outcome", "outcome")
                .field("report", "report")
                .field("performed_period", "performedPeriod")
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

impl Procedure {
    pub fn status(&self) -> Option<&str> {
        self.resource.attribute_str("status")
    }

    pub fn code(&self) -> Option<CodeableConcept> {
        self.resource.attribute_as("code")
    }

    pub fn subject(&self) -> Option<Reference> {
        self.resource.attribute_as("subject")
    }

    /// `performed[x]` as sent (dateTime, Period, string, Age or Range)
    pub fn performed(&self) -> Option<&Value> {
        self.resource.attribute("performed")
    }

    pub fn performed_period(&self) -> Option<Period> {
        self.resource.attribute_as("performed_period")
    }

    pub fn reason_codes(&self) -> Vec<CodeableConcept> {
        self.resource.attribute_as("reason_code").unwrap_or_default()
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code().as_ref().and_then(CodeableConcept::label) {
            Some(label) => f.write_str(label),
            None => f.write_str("Procedure has no code attribute."),
        }
    }
}
