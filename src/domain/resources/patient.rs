//! Patient resource

use crate::domain::datatypes::{CodeableConcept, HumanName};
use crate::domain::resource::{FhirObject, FhirResource};
use crate::domain::resource_type::ResourceType;
use crate::domain::schema::ResourceSchema;
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Date format of `Patient.birthDate`
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Demographic record of a person receiving care
#[derive(Debug, Clone)]
pub struct Patient {
    resource: FhirResource,
}

impl FhirObject for Patient {
    const RESOURCE_TYPE: ResourceType = ResourceType::Patient;

    fn schema() -> &'static ResourceSchema {
        static SCHEMA: OnceLock<ResourceSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ResourceSchema::new(ResourceType::Patient)
                .field("identifier", "identifier")
                .field("resource_type", "resourceType")
                .field("id", "id")
                .field("active", "active")
                .field("gender", "gender")
                .field("name", "name")
                .field("birth_date", "birthDate")
                .choice("deceased", "deceased")
                .field("marital_status", "maritalStatus")
                .field("address", "address")
                .primary("name")
        })
    }

    fn from_resource(resource: FhirResource) -> Self {
        Self { resource }
    }

    fn resource(&self) -> &FhirResource {
        &self.resource
    }
}

impl Patient {
    pub fn active(&self) -> Option<bool> {
        self.resource.attribute("active").and_then(Value::as_bool)
    }

    pub fn gender(&self) -> Option<&str> {
        self.resource.attribute_str("gender")
    }

    /// `birthDate` when it is a full `YYYY-MM-DD` date
    pub fn birth_date(&self) -> Option<NaiveDate> {
        let raw = self.resource.attribute_str("birth_date")?;
        NaiveDate::parse_from_str(raw, BIRTH_DATE_FORMAT).ok()
    }

    pub fn names(&self) -> Vec<HumanName> {
        self.resource.attribute_as("name").unwrap_or_default()
    }

    /// `deceasedBoolean` or `deceasedDateTime`, whichever the server sent
    pub fn deceased(&self) -> Option<&Value> {
        self.resource.attribute("deceased")
    }

    pub fn marital_status(&self) -> Option<CodeableConcept> {
        self.resource.attribute_as("marital_status")
    }

    /// Human-readable name
    ///
    /// The first name's `text` wins; otherwise the first official name is
    /// formatted as `"<prefixes> <family>, <given>"`.
    pub fn display_name(&self) -> Option<String> {
        let names = self.names();
        if let Some(text) = names.first().and_then(|n| n.text.clone()) {
            return Some(text);
        }
        names
            .iter()
            .find(|n| n.is_official())
            .or_else(|| names.iter().find(|n| n.family.is_some() || !n.given.is_empty()))
            .map(HumanName::formatted)
    }

    /// Age in whole years on `on`, counted as elapsed days / 365
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        let days = (on - self.birth_date()?).num_days();
        if days < 0 {
            return None;
        }
        u32::try_from(days / 365).ok()
    }

    /// Age in whole years today (UTC)
    pub fn age(&self) -> Option<u32> {
        self.age_on(Utc::now().date_naive())
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name() {
            Some(name) => f.write_str(&name),
            None => f.write_str("Patient has no name attribute."),
        }
    }
}
