//! FHIR wire models
//!
//! Only the parts of a searchset Bundle the collector needs. Resources stay
//! as raw JSON objects until they are mapped into typed domain objects.

use crate::domain::{FhirError, ResourceType};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Link relation that points at the following page
pub const NEXT_RELATION: &str = "next";

/// One page of search results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default)]
    pub resource_type: Option<String>,

    #[serde(default, rename = "type")]
    pub bundle_type: Option<String>,

    #[serde(default)]
    pub total: Option<u64>,

    /// A missing or null `link` means there are no further pages
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: Vec<BundleLink>,

    /// A missing or null `entry` means zero entries
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entry: Vec<BundleEntry>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleLink {
    pub relation: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    #[serde(default)]
    pub full_url: Option<String>,

    #[serde(default)]
    pub resource: Option<Map<String, Value>>,
}

impl BundleEntry {
    /// The `resourceType` of the wrapped resource
    pub fn resource_type(&self) -> Option<&str> {
        self.resource
            .as_ref()
            .and_then(|r| r.get("resourceType"))
            .and_then(Value::as_str)
    }
}

impl Bundle {
    /// Parse a response body that must be a Bundle
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidResponse`] when the body is not JSON,
    /// does not match the Bundle shape, or names a different `resourceType`.
    pub fn from_body(body: &str) -> Result<Self, FhirError> {
        let bundle: Bundle = serde_json::from_str(body)
            .map_err(|e| FhirError::InvalidResponse(format!("Expected a Bundle: {e}")))?;

        match bundle.resource_type.as_deref() {
            None | Some("Bundle") => Ok(bundle),
            Some(other) => Err(FhirError::InvalidResponse(format!(
                "Expected a Bundle, got a {other}"
            ))),
        }
    }

    /// URL of the next page, if any
    pub fn next_link(&self) -> Option<&str> {
        self.link
            .iter()
            .find(|link| link.relation == NEXT_RELATION)
            .map(|link| link.url.as_str())
    }

    /// Take the entries whose resource carries `resource_type`, in page order
    pub fn take_entries(&mut self, resource_type: ResourceType) -> Vec<RawEntry> {
        std::mem::take(&mut self.entry)
            .into_iter()
            .filter_map(|entry| {
                let resource = entry.resource?;
                let tag = resource.get("resourceType").and_then(Value::as_str)?;
                resource_type.matches(tag).then(|| RawEntry {
                    resource_type,
                    resource,
                })
            })
            .collect()
    }
}

/// A resource lifted out of a Bundle, still in raw JSON form
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub resource_type: ResourceType,
    pub resource: Map<String, Value>,
}

impl RawEntry {
    /// The tag actually carried by the raw resource
    pub fn tag(&self) -> Option<&str> {
        self.resource.get("resourceType").and_then(Value::as_str)
    }
}
