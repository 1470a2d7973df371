//! Generic resource object
//!
//! [`FhirResource`] is the base entity every typed resource wraps: the
//! resource-type tag, the schema attributes extracted from the raw JSON, and
//! the raw JSON itself. Extraction happens once, at construction.

use super::errors::FhirError;
use super::resource_type::ResourceType;
use super::schema::ResourceSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A raw FHIR resource mapped through its [`ResourceSchema`]
#[derive(Debug, Clone)]
pub struct FhirResource {
    schema: &'static ResourceSchema,
    attributes: BTreeMap<&'static str, Value>,
    raw: Map<String, Value>,
}

impl FhirResource {
    /// Build a resource from its raw JSON object
    ///
    /// # Errors
    ///
    /// Fails with [`FhirError::MissingResourceType`] when the object has no
    /// `resourceType`, and with [`FhirError::ResourceTypeMismatch`] when the
    /// tag differs from the schema's type. Nothing is ever coerced.
    pub fn from_json(
        raw: Map<String, Value>,
        schema: &'static ResourceSchema,
    ) -> Result<Self, FhirError> {
        let expected = schema.resource_type();
        let found = raw
            .get("resourceType")
            .and_then(Value::as_str)
            .ok_or_else(|| FhirError::MissingResourceType(expected.to_string()))?;

        if !expected.matches(found) {
            return Err(FhirError::ResourceTypeMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }

        let attributes = schema
            .attributes()
            .iter()
            .filter_map(|spec| spec.rule.extract(&raw).map(|v| (spec.name, v.clone())))
            .collect();

        Ok(Self {
            schema,
            attributes,
            raw,
        })
    }

    pub fn resource_type(&self) -> ResourceType {
        self.schema.resource_type()
    }

    /// Logical id of the resource on the server
    pub fn id(&self) -> Option<&str> {
        self.raw.get("id").and_then(Value::as_str)
    }

    /// Value of a schema attribute; `None` when the resource omits it
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// String value of a schema attribute
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(Value::as_str)
    }

    /// Deserialize a schema attribute into a typed FHIR datatype
    ///
    /// Returns `None` when the attribute is absent or has an unexpected shape.
    pub fn attribute_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let value = self.attribute(name)?;
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!(
                    resource_type = %self.resource_type(),
                    attribute = name,
                    error = %e,
                    "Attribute has an unexpected shape"
                );
                None
            }
        }
    }

    /// Whether the schema for this resource type declares `name`
    pub fn has_attribute(&self, name: &str) -> bool {
        self.schema.declares(name)
    }

    /// Whether `name` is declared and present in this resource
    pub fn is_present(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Names of the attributes present in this resource, in schema order
    pub fn present_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schema
            .attributes()
            .iter()
            .map(|spec| spec.name)
            .filter(|name| self.attributes.contains_key(name))
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }
}

impl fmt::Display for FhirResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(primary) = self.schema.primary_attribute() else {
            return match self.id() {
                Some(id) => write!(f, "{}/{}", self.resource_type(), id),
                None => write!(f, "{}", self.resource_type()),
            };
        };

        match self.attribute(primary) {
            Some(Value::String(s)) => f.write_str(s),
            Some(value) => write!(f, "{value}"),
            None => write!(f, "{} has no {} attribute.", self.resource_type(), primary),
        }
    }
}

/// A typed resource built on top of [`FhirResource`]
///
/// Implementors declare their resource type and schema; construction and
/// tag validation are shared.
pub trait FhirObject: Sized + fmt::Display {
    /// The `resourceType` tag this object is built from
    const RESOURCE_TYPE: ResourceType;

    /// The attribute schema, built once per process
    fn schema() -> &'static ResourceSchema;

    /// Wrap an already validated resource
    fn from_resource(resource: FhirResource) -> Self;

    /// The underlying generic resource
    fn resource(&self) -> &FhirResource;

    /// Build the typed object from a raw JSON object
    ///
    /// # Errors
    ///
    /// Fails when the raw tag is absent or differs from [`Self::RESOURCE_TYPE`].
    fn from_json(raw: Map<String, Value>) -> Result<Self, FhirError> {
        let resource = FhirResource::from_json(raw, Self::schema())?;
        debug_assert_eq!(resource.resource_type(), Self::RESOURCE_TYPE);
        Ok(Self::from_resource(resource))
    }

    /// Build the typed object from any JSON value
    fn from_value(value: Value) -> Result<Self, FhirError> {
        match value {
            Value::Object(raw) => Self::from_json(raw),
            other => Err(FhirError::InvalidResponse(format!(
                "Expected a {} object, got {}",
                Self::RESOURCE_TYPE,
                json_kind(&other)
            ))),
        }
    }

    fn id(&self) -> Option<&str> {
        self.resource().id()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::OnceLock;

    fn test_schema() -> &'static ResourceSchema {
        static SCHEMA: OnceLock<ResourceSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ResourceSchema::new(ResourceType::Condition)
                .field("id", "id")
                .field("code", "code")
                .choice("onset", "onset")
                .primary("code")
        })
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_from_json_extracts_declared_attributes() {
        let raw = object(json!({
            "resourceType": "Condition",
            "id": "c1",
            "code": "flu",
            "onsetDateTime": "2020-01-01",
            "note": "not in schema"
        }));

        let resource = FhirResource::from_json(raw, test_schema()).unwrap();

        assert_eq!(resource.resource_type(), ResourceType::Condition);
        assert_eq!(resource.id(), Some("c1"));
        assert_eq!(resource.attribute_str("onset"), Some("2020-01-01"));
        assert!(resource.attribute("note").is_none());
        assert!(!resource.has_attribute("note"));
        assert_eq!(
            resource.present_attributes().collect::<Vec<_>>(),
            vec!["id", "code", "onset"]
        );
    }

    #[test]
    fn test_absent_attribute_is_none_not_error() {
        let raw = object(json!({"resourceType": "Condition"}));
        let resource = FhirResource::from_json(raw, test_schema()).unwrap();

        assert!(resource.has_attribute("code"));
        assert!(!resource.is_present("code"));
        assert_eq!(resource.attribute("code"), None);
    }

    #[test]
    fn test_mismatched_tag_fails() {
        let raw = object(json!({"resourceType": "Patient", "code": "flu"}));
        let err = FhirResource::from_json(raw, test_schema()).unwrap_err();

        assert!(matches!(
            err,
            FhirError::ResourceTypeMismatch { ref expected, ref found }
                if expected == "Condition" && found == "Patient"
        ));
    }

    #[test]
    fn test_missing_tag_fails() {
        let raw = object(json!({"code": "flu"}));
        let err = FhirResource::from_json(raw, test_schema()).unwrap_err();
        assert!(matches!(err, FhirError::MissingResourceType(_)));
    }

    #[test]
    fn test_display_primary_and_fallback() {
        let with_code = FhirResource::from_json(
            object(json!({"resourceType": "Condition", "code": "flu"})),
            test_schema(),
        )
        .unwrap();
        assert_eq!(with_code.to_string(), "flu");

        let without_code =
            FhirResource::from_json(object(json!({"resourceType": "Condition"})), test_schema())
                .unwrap();
        assert_eq!(
            without_code.to_string(),
            "Condition has no code attribute."
        );
    }

    #[test]
    fn test_attribute_as_wrong_shape_is_none() {
        let resource = FhirResource::from_json(
            object(json!({"resourceType": "Condition", "code": "flu"})),
            test_schema(),
        )
        .unwrap();
        let parsed: Option<Vec<String>> = resource.attribute_as("code");
        assert!(parsed.is_none());
    }
}
