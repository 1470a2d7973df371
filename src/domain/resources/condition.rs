//! Condition resource

use crate::domain::datatypes::{CodeableConcept, Reference};
use crate::domain::resource::{FhirObject, FhirResource};
use crate::domain::resource_type::ResourceType;
use crate::domain::schema::ResourceSchema;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Clinical condition, problem or diagnosis
#[derive(Debug, Clone)]
pub struct Condition {
    resource: FhirResource,
}

impl FhirObject for Condition {
    const RESOURCE_TYPE: ResourceType = ResourceType::Condition;

    fn schema() -> &'static ResourceSchema {
        static SCHEMA: OnceLock<ResourceSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ResourceSchema::new(ResourceType::Condition)
                .field("identifier", "identifier")
                .field("resource_type", "resourceType")
                .field("id", "id")
                .field("clinical_status", "clinicalStatus")
                .field("verification_status", "verificationStatus")
                .field("category", "category")
                .field("severity", "severity")
                .field("code", "code")
                .field("subject", "subject")
                .choice("onset", "onset")
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

impl Condition {
    pub fn code(&self) -> Option<CodeableConcept> {
        self.resource.attribute_as("code")
    }

    /// R4 sends a CodeableConcept, STU3 a bare code string
    pub fn clinical_status(&self) -> Option<String> {
        match self.resource.attribute("clinical_status")? {
            Value::String(s) => Some(s.clone()),
            other => serde_json::from_value::<CodeableConcept>(other.clone())
                .ok()
                .and_then(|cc| cc.coding.into_iter().find_map(|c| c.code)),
        }
    }

    pub fn severity(&self) -> Option<CodeableConcept> {
        self.resource.attribute_as("severity")
    }

    pub fn subject(&self) -> Option<Reference> {
        self.resource.attribute_as("subject")
    }

    /// `onset[x]` as sent (dateTime, Age, Period, Range or string)
    pub fn onset(&self) -> Option<&Value> {
        self.resource.attribute("onset")
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code().as_ref().and_then(CodeableConcept::label) {
            Some(label) => f.write_str(label),
            None => f.write_str("Condition has no code attribute."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_condition_getters() {
        let c = Condition::from_value(json!({
            "resourceType": "Condition",
            "id": "c1",
            "clinicalStatus": {"coding": [{"system": "http://terminology.hl7.org/CodeSystem/condition-clinical", "code": "active"}]},
            "code": {"coding": [{"system": "http://snomed.info/sct", "code": "195662009", "display": "Acute viral pharyngitis"}]},
            "subject": {"reference": "Patient/p1"},
            "onsetDateTime": "2019-03-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(c.clinical_status().as_deref(), Some("active"));
        assert_eq!(c.to_string(), "Acute viral pharyngitis");
        assert_eq!(
            c.subject().and_then(|r| r.reference),
            Some("Patient/p1".to_string())
        );
        assert_eq!(c.onset(), Some(&json!("2019-03-02T10:00:00Z")));
    }

    #[test]
    fn test_stu3_clinical_status_string() {
        let c = Condition::from_value(json!({"resourceType": "Condition", "clinicalStatus": "resolved"}))
            .unwrap();
        assert_eq!(c.clinical_status().as_deref(), Some("resolved"));
        assert_eq!(c.to_string(), "Condition has no code attribute.");
    }

    #[test]
    fn test_rejects_patient() {
        assert!(Condition::from_value(json!({"resourceType": "Patient"})).is_err());
    }
}
