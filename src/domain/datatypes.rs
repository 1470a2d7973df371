//! FHIR complex datatypes
//!
//! Only the handful of datatypes the typed getters need. Unknown fields are
//! ignored when deserializing.

use serde::{Deserialize, Serialize};

/// A code defined by a terminology system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    /// `system|code` token as used by FHIR token search
    pub fn token(&self) -> Option<String> {
        match (&self.system, &self.code) {
            (Some(system), Some(code)) => Some(format!("{system}|{code}")),
            (None, Some(code)) => Some(code.clone()),
            _ => None,
        }
    }
}

/// Concept expressed by codings and/or text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// Best human-readable label: `text`, else the first coding display
    pub fn label(&self) -> Option<&str> {
        self.text
            .as_deref()
            .or_else(|| self.coding.iter().find_map(|c| c.display.as_deref()))
    }

    /// Whether any coding carries `system` and `code`
    pub fn has_coding(&self, system: &str, code: &str) -> bool {
        self.coding
            .iter()
            .any(|c| c.system.as_deref() == Some(system) && c.code.as_deref() == Some(code))
    }
}

/// Name of a person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub name_use: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefix: Vec<String>,
}

impl HumanName {
    pub fn is_official(&self) -> bool {
        self.name_use.as_deref() == Some("official")
    }

    /// `"<prefixes> <family>, <given>"`
    pub fn formatted(&self) -> String {
        format!(
            "{} {}, {}",
            self.prefix.join(" "),
            self.family.as_deref().unwrap_or_default(),
            self.given.join(" ")
        )
    }
}

/// Measured amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Time range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Link from one resource to another
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    /// Split a relative literal reference `Type/id` into its parts
    ///
    /// Absolute URLs are accepted when they end in `Type/id`; a trailing
    /// `_history/<vid>` segment is dropped.
    pub fn type_and_id(&self) -> Option<(&str, &str)> {
        let reference = self.reference.as_deref()?;
        let reference = match reference.find("/_history/") {
            Some(idx) => &reference[..idx],
            None => reference,
        };
        let mut segments = reference.rsplit('/');
        let id = segments.next().filter(|s| !s.is_empty())?;
        let resource_type = segments.next().filter(|s| !s.is_empty())?;
        Some((resource_type, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_codeable_concept_label_prefers_text() {
        let cc: CodeableConcept = serde_json::from_value(json!({
            "coding": [{"system": "http://snomed.info/sct", "code": "195662009", "display": "Acute viral pharyngitis"}],
            "text": "Sore throat"
        }))
        .unwrap();
        assert_eq!(cc.label(), Some("Sore throat"));
        assert!(cc.has_coding("http://snomed.info/sct", "195662009"));
        assert_eq!(
            cc.coding[0].token().as_deref(),
            Some("http://snomed.info/sct|195662009")
        );
    }

    #[test]
    fn test_codeable_concept_label_falls_back_to_display() {
        let cc: CodeableConcept = serde_json::from_value(json!({
            "coding": [{"code": "x"}, {"code": "y", "display": "Why"}]
        }))
        .unwrap();
        assert_eq!(cc.label(), Some("Why"));
    }

    #[test]
    fn test_human_name_formatted() {
        let name: HumanName = serde_json::from_value(json!({
            "use": "official",
            "family": "Chalmers",
            "given": ["Peter", "James"],
            "prefix": ["Mr."]
        }))
        .unwrap();
        assert!(name.is_official());
        assert_eq!(name.formatted(), "Mr. Chalmers, Peter James");
    }

    #[test]
    fn test_reference_type_and_id() {
        let relative = Reference {
            reference: Some("Patient/123".to_string()),
            display: None,
        };
        assert_eq!(relative.type_and_id(), Some(("Patient", "123")));

        let absolute = Reference {
            reference: Some("http://fhir.example.org/baseR4/Patient/9/_history/2".to_string()),
            display: None,
        };
        assert_eq!(absolute.type_and_id(), Some(("Patient", "9")));

        let contained = Reference {
            reference: Some("#p1".to_string()),
            display: None,
        };
        assert_eq!(contained.type_and_id(), None);
    }
}
