//! Resource schemas
//!
//! A [`ResourceSchema`] maps friendly attribute names onto extraction rules
//! into a raw FHIR JSON object. Schemas are plain read-only tables; the
//! per-type instances live next to the typed resources and are built once.

use super::resource_type::ResourceType;
use serde_json::{Map, Value};

/// How an attribute is located inside a raw resource object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    /// The value stored under this exact JSON key
    Field(&'static str),

    /// A FHIR choice element `prefix[x]`, stored under the first key made
    /// of `prefix` followed by an upper-case type suffix (`deceasedBoolean`,
    /// `onsetDateTime`, `valueQuantity`, ...)
    Choice(&'static str),
}

impl ExtractionRule {
    /// Locate the value this rule points at, if present
    pub fn extract<'a>(&self, raw: &'a Map<String, Value>) -> Option<&'a Value> {
        match self {
            ExtractionRule::Field(key) => raw.get(*key),
            ExtractionRule::Choice(prefix) => raw.iter().find_map(|(key, value)| {
                key.strip_prefix(prefix)
                    .and_then(|suffix| suffix.chars().next())
                    .filter(|c| c.is_ascii_uppercase())
                    .map(|_| value)
            }),
        }
    }
}

/// One schema row: the attribute name callers use and where to find it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub rule: ExtractionRule,
}

/// Declarative attribute map for one resource type
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    resource_type: ResourceType,
    attributes: Vec<AttributeSpec>,
    primary: Option<&'static str>,
}

impl ResourceSchema {
    /// Start an empty schema for `resource_type`
    pub fn new(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            attributes: Vec::new(),
            primary: None,
        }
    }

    /// Declare an attribute read from an exact key
    pub fn field(mut self, name: &'static str, key: &'static str) -> Self {
        self.attributes.push(AttributeSpec {
            name,
            rule: ExtractionRule::Field(key),
        });
        self
    }

    /// Declare an attribute read from a choice element `prefix[x]`
    pub fn choice(mut self, name: &'static str, prefix: &'static str) -> Self {
        self.attributes.push(AttributeSpec {
            name,
            rule: ExtractionRule::Choice(prefix),
        });
        self
    }

    /// Designate the attribute surfaced by the human-readable representation
    pub fn primary(mut self, name: &'static str) -> Self {
        self.primary = Some(name);
        self
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    pub fn primary_attribute(&self) -> Option<&'static str> {
        self.primary
    }

    /// Whether the schema declares `name`
    pub fn declares(&self, name: &str) -> bool {
        self.attributes.iter().any(|spec| spec.name == name)
    }
}
