//! Search URL construction
//!
//! Values are inserted verbatim. FHIR search tokens such as
//! `http://snomed.info/sct|73211009` are expected to pass through unchanged.

use std::fmt;

/// A search against one resource-type path with ordered parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    path: String,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter; empty values are kept here and dropped by [`build`]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Append a parameter only when a value is present
    pub fn param_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(name, v.to_string()),
            None => self,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Full URL of this query under `base_url`
    pub fn url(&self, base_url: &str) -> String {
        build(base_url, &self.path, &self.params)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&build("", &self.path, &self.params))
    }
}

/// Join `base_url` and `path` and append the non-empty parameters
///
/// Exactly one `/` separates base and path. Parameters keep their insertion
/// order and are joined with `&`; the result never ends with `&`, and has no
/// `?` when every value is empty.
pub fn build<N, V>(base_url: &str, path: &str, params: &[(N, V)]) -> String
where
    N: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    let query = params
        .iter()
        .filter(|(_, value)| !value.as_ref().is_empty())
        .map(|(name, value)| format!("{}={}", name.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("&");

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const BASE: &str = "http://hapi.fhir.org/baseR4";

    #[test_case(BASE, "Patient", &[], "http://hapi.fhir.org/baseR4/Patient" ; "no params")]
    #[test_case("http://hapi.fhir.org/baseR4/", "Patient", &[], "http://hapi.fhir.org/baseR4/Patient" ; "base with trailing slash")]
    #[test_case(BASE, "Patient", &[("_count", "5")], "http://hapi.fhir.org/baseR4/Patient?_count=5" ; "single param")]
    #[test_case(BASE, "Patient", &[("_count", "")], "http://hapi.fhir.org/baseR4/Patient" ; "only empty param")]
    #[test_case(BASE, "Condition", &[("code:text", "diabetes"), ("_include", "Condition:patient")],
        "http://hapi.fhir.org/baseR4/Condition?code:text=diabetes&_include=Condition:patient" ; "insertion order")]
    #[test_case(BASE, "Observation", &[("patient", ""), ("_count", "10")],
        "http://hapi.fhir.org/baseR4/Observation?_count=10" ; "empty value omitted")]
    #[test_case(BASE, "Patient", &[("_has:Procedure:patient:code", "http://snomed.info/sct|73761001")],
        "http://hapi.fhir.org/baseR4/Patient?_has:Procedure:patient:code=http://snomed.info/sct|73761001" ; "token not encoded")]
    fn test_build(base: &str, path: &str, params: &[(&str, &str)], expected: &str) {
        let url = build(base, path, params);
        assert_eq!(url, expected);
        assert!(!url.ends_with('&'));
    }

    #[test]
    fn test_query_builder() {
        let query = Query::new("Observation")
            .param("patient", "p1")
            .param_opt("_count", Some(50))
            .param_opt::<u32>("_sort", None);

        assert_eq!(query.path(), "Observation");
        assert_eq!(query.params().len(), 2);
        assert_eq!(
            query.url(BASE),
            "http://hapi.fhir.org/baseR4/Observation?patient=p1&_count=50"
        );
        assert_eq!(query.to_string(), "/Observation?patient=p1&_count=50");
    }
}
