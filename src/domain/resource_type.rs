//! FHIR resource type tags
//!
//! The closed set of resource types this client maps into typed objects.

use super::errors::FhirError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource type tag as carried in a resource's `resourceType` field
///
/// # Examples
///
/// ```
/// use fhir_fetch::domain::ResourceType;
/// use std::str::FromStr;
///
/// let rt = ResourceType::from_str("Patient").unwrap();
/// assert_eq!(rt, ResourceType::Patient);
/// assert_eq!(rt.as_str(), "Patient");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Patient,
    Condition,
    Observation,
    Procedure,
}

impl ResourceType {
    /// Every supported resource type, in a stable order
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Patient,
        ResourceType::Condition,
        ResourceType::Observation,
        ResourceType::Procedure,
    ];

    /// Returns the tag exactly as FHIR spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Patient => "Patient",
            ResourceType::Condition => "Condition",
            ResourceType::Observation => "Observation",
            ResourceType::Procedure => "Procedure",
        }
    }

    /// Whether a raw `resourceType` tag names this type
    pub fn matches(&self, tag: &str) -> bool {
        self.as_str() == tag
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|rt| rt.matches(s))
            .ok_or_else(|| FhirError::UnsupportedResourceType(s.to_string()))
    }
}

impl AsRef<str> for ResourceType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_tags() {
        for rt in ResourceType::ALL {
            assert_eq!(ResourceType::from_str(rt.as_str()).unwrap(), rt);
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!(ResourceType::from_str("patient").is_err());
    }

    #[test]
    fn test_unsupported_tag() {
        let err = ResourceType::from_str("Encounter").unwrap_err();
        assert!(matches!(err, FhirError::UnsupportedResourceType(ref t) if t == "Encounter"));
    }
}
