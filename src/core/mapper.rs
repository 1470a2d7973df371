//! Raw entries to typed resources

use crate::adapters::fhir::models::RawEntry;
use crate::domain::{AnyResource, FhirError, FhirObject, Result};

/// Map raw entries into `T`, keeping their order
///
/// Every entry's tag is checked against `T` again before construction.
///
/// # Errors
///
/// Returns [`FhirError::ResourceTypeMismatch`] for an entry tagged with a
/// different type, and any construction error of `T`.
pub fn map<T: FhirObject>(entries: Vec<RawEntry>) -> Result<Vec<T>> {
    map_with(entries, T::from_json)
}

/// Map raw entries through an explicit constructor
pub fn map_with<T, F>(entries: Vec<RawEntry>, build: F) -> Result<Vec<T>>
where
    T: FhirObject,
    F: Fn(serde_json::Map<String, serde_json::Value>) -> std::result::Result<T, FhirError>,
{
    let mut mapped = Vec::with_capacity(entries.len());

    for entry in entries {
        if entry.resource_type != T::RESOURCE_TYPE {
            return Err(FhirError::ResourceTypeMismatch {
                expected: T::RESOURCE_TYPE.to_string(),
                found: entry.resource_type.to_string(),
            }
            .into());
        }
        mapped.push(build(entry.resource)?);
    }

    Ok(mapped)
}

/// Map raw entries of any supported type
pub fn map_any(entries: Vec<RawEntry>) -> Result<Vec<AnyResource>> {
    entries
        .into_iter()
        .map(|entry| AnyResource::build(entry.resource_type, entry.resource).map_err(Into::into))
        .collect()
}
