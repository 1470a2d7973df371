//! FHIR client facade
//!
//! Every named operation is a fixed search: build the query, GET it through
//! the session, parse the first Bundle, follow its pages and map the entries
//! into typed resources. Any failure aborts the operation with no partial
//! result.

use super::models::Bundle;
use super::query::Query;
use super::transport::{self, HttpTransport, Transport};
use crate::config::{FetchConfig, ServerConfig};
use crate::core::collect::{BundleCollector, DEFAULT_MAX_PAGES};
use crate::core::mapper;
use crate::domain::{
    AnyResource, Condition, FhirError, FhirObject, HasSubject, Observation, Patient, Procedure,
    ResourceType, Result,
};
use crate::{log_search_complete, log_search_start};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;

/// Path of the capability statement endpoint
pub const METADATA_PATH: &str = "metadata";

/// Client bound to one FHIR server
///
/// Holds a pooled session that is reused for every page of every search.
/// The client carries no mutable state and is cheap to share behind an
/// `Arc`.
///
/// # Example
///
/// ```no_run
/// use fhir_fetch::adapters::fhir::FhirClient;
///
/// # async fn example() -> fhir_fetch::domain::Result<()> {
/// let client = FhirClient::new("http://hapi.fhir.org/baseR4")?;
/// for patient in client.get_patients_by_condition_text("diabetes").await? {
///     println!("{patient}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FhirClient {
    server: ServerConfig,
    session: Arc<dyn Transport>,
    max_pages: usize,
    page_size: Option<u32>,
}

impl std::fmt::Debug for FhirClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FhirClient")
            .field("base_url", &self.server.base_url)
            .field("max_pages", &self.max_pages)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl FhirClient {
    /// Anonymous client for `base_url` with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let server = ServerConfig::new(base_url);
        let session = HttpTransport::new(&server)?;
        Ok(Self::with_session(server, Arc::new(session)))
    }

    /// Client configured from a loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let session = HttpTransport::new(&config.server)?;
        Ok(Self::with_session(config.server.clone(), Arc::new(session))
            .with_max_pages(config.pagination.max_pages)
            .with_page_size(config.pagination.page_size))
    }

    /// Client routed through an arbitrary transport
    ///
    /// One-off requests use anonymous default server settings.
    pub fn with_transport(base_url: impl Into<String>, session: Arc<dyn Transport>) -> Self {
        Self::with_session(ServerConfig::new(base_url), session)
    }

    fn with_session(server: ServerConfig, session: Arc<dyn Transport>) -> Self {
        Self {
            server,
            session,
            max_pages: DEFAULT_MAX_PAGES,
            page_size: None,
        }
    }

    /// Page ceiling for one search; values below 1 are raised to 1
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Page size sent as `_count`; `None` leaves it to the server
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.server.base_url
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// The server's CapabilityStatement as raw JSON
    ///
    /// Fetched through a one-off transport rather than the session. The
    /// one-off transport carries the same credentials, TLS and timeout
    /// settings as the session.
    pub async fn get_capability_statement(&self) -> Result<Value> {
        let url = Query::new(METADATA_PATH).url(self.base_url());
        let once = HttpTransport::new(&self.server)?;
        let response = transport::get_ok(&url, Some(&once as &dyn Transport)).await?;
        Ok(response.json()?)
    }

    /// Verify the server answers `metadata` through the session
    pub async fn health_check(&self) -> Result<()> {
        let url = Query::new(METADATA_PATH).url(self.base_url());
        match transport::get_ok(&url, Some(self.session.as_ref())).await {
            Ok(_) => {
                tracing::info!(base_url = %self.base_url(), "FHIR server health check passed");
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    base_url = %self.base_url(),
                    error = %e,
                    "FHIR server health check failed"
                );
                Err(e)
            }
        }
    }

    pub async fn get_all_patients(&self) -> Result<Vec<Patient>> {
        self.search(self.paged(ResourceType::Patient)).await
    }

    pub async fn get_all_conditions(&self) -> Result<Vec<Condition>> {
        self.search(self.paged(ResourceType::Condition)).await
    }

    pub async fn get_all_observations(&self) -> Result<Vec<Observation>> {
        self.search(self.paged(ResourceType::Observation)).await
    }

    pub async fn get_all_procedures(&self) -> Result<Vec<Procedure>> {
        self.search(self.paged(ResourceType::Procedure)).await
    }

    /// Every resource of a type only known at runtime
    pub async fn get_all(&self, resource_type: ResourceType) -> Result<Vec<AnyResource>> {
        self.search_any(self.paged(resource_type), resource_type)
            .await
    }

    /// Patients with a Procedure coded `system|code`
    pub async fn get_patients_by_procedure_code(
        &self,
        system: &str,
        code: &str,
    ) -> Result<Vec<Patient>> {
        let query = Query::new(ResourceType::Patient.as_str())
            .param("_has:Procedure:patient:code", format!("{system}|{code}"));
        self.search(query).await
    }

    /// Patients included alongside Procedures whose code text matches `text`
    pub async fn get_patients_by_procedure_text(&self, text: &str) -> Result<Vec<Patient>> {
        let query = Query::new(ResourceType::Procedure.as_str())
            .param("code:text", text)
            .param("_include", "Procedure:patient");
        self.search(query).await
    }

    /// Patients with a Condition coded `system|code`
    pub async fn get_patients_by_condition_code(
        &self,
        system: &str,
        code: &str,
    ) -> Result<Vec<Patient>> {
        let query = Query::new(ResourceType::Patient.as_str())
            .param("_has:Condition:patient:code", format!("{system}|{code}"));
        self.search(query).await
    }

    /// Patients included alongside Conditions whose code text matches `text`
    pub async fn get_patients_by_condition_text(&self, text: &str) -> Result<Vec<Patient>> {
        let query = Query::new(ResourceType::Condition.as_str())
            .param("code:text", text)
            .param("_include", "Condition:patient");
        self.search(query).await
    }

    pub async fn get_observations_by_patient(&self, patient_id: &str) -> Result<Vec<Observation>> {
        let query = Query::new(ResourceType::Observation.as_str()).param("patient", patient_id);
        self.search(query).await
    }

    /// Observations of an already fetched patient
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidReference`] when the patient has no id.
    pub async fn get_observations_for(&self, patient: &Patient) -> Result<Vec<Observation>> {
        let id = patient
            .id()
            .ok_or_else(|| FhirError::InvalidReference("Patient has no id".to_string()))?;
        self.get_observations_by_patient(id).await
    }

    /// Read one resource by id
    pub async fn read<T: FhirObject>(&self, id: &str) -> Result<T> {
        if id.is_empty() || id.contains('/') {
            return Err(FhirError::InvalidReference(format!(
                "'{id}' is not a valid {} id",
                T::RESOURCE_TYPE
            ))
            .into());
        }

        let url = Query::new(format!("{}/{id}", T::RESOURCE_TYPE)).url(self.base_url());
        tracing::debug!(url = %url, resource_type = %T::RESOURCE_TYPE, "Reading resource");

        let response = transport::get_ok(&url, Some(self.session.as_ref())).await?;
        let raw: Map<String, Value> = response.json()?;
        Ok(T::from_json(raw)?)
    }

    /// Read the Patient a Condition, Observation or Procedure refers to
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidReference`] when the subject is missing or
    /// does not point at a Patient.
    pub async fn resolve_subject<R: HasSubject>(&self, resource: &R) -> Result<Patient> {
        let subject = resource
            .subject()
            .ok_or_else(|| FhirError::InvalidReference("Resource has no subject".to_string()))?;

        let (resource_type, id) = subject.type_and_id().ok_or_else(|| {
            FhirError::InvalidReference(format!(
                "Subject '{}' is not a literal reference",
                subject.reference.as_deref().unwrap_or_default()
            ))
        })?;

        if !ResourceType::Patient.matches(resource_type) {
            return Err(FhirError::InvalidReference(format!(
                "Subject refers to a {resource_type}, not a Patient"
            ))
            .into());
        }

        self.read::<Patient>(id).await
    }

    /// Run a search and map every entry of type `T` across all pages
    pub async fn search<T: FhirObject>(&self, query: Query) -> Result<Vec<T>> {
        let started = Instant::now();
        let collection = self.collect(&query, T::RESOURCE_TYPE).await?;
        let pages = collection.pages;
        let resources = mapper::map::<T>(collection.entries)?;

        log_search_complete!(T::RESOURCE_TYPE, resources.len(), pages, started.elapsed());
        Ok(resources)
    }

    /// Run a search whose result type is chosen at runtime
    pub async fn search_any(
        &self,
        query: Query,
        resource_type: ResourceType,
    ) -> Result<Vec<AnyResource>> {
        let started = Instant::now();
        let collection = self.collect(&query, resource_type).await?;
        let pages = collection.pages;
        let resources = mapper::map_any(collection.entries)?;

        log_search_complete!(resource_type, resources.len(), pages, started.elapsed());
        Ok(resources)
    }

    async fn collect(
        &self,
        query: &Query,
        resource_type: ResourceType,
    ) -> Result<crate::core::collect::Collection> {
        let url = query.url(self.base_url());
        log_search_start!(resource_type, url);

        let session = self.session.as_ref();
        let response = transport::get_ok(&url, Some(session)).await?;
        let first = Bundle::from_body(&response.body)?;

        BundleCollector::new(session, self.max_pages)
            .collect_pages(first, resource_type)
            .await
    }

    /// Query for a whole resource type with the configured page size
    fn paged(&self, resource_type: ResourceType) -> Query {
        Query::new(resource_type.as_str()).param_opt("_count", self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collect::tests::{bundle, StubTransport};
    use crate::domain::FetchError;
    use serde_json::json;

    const BASE: &str = "http://fhir.test/baseR4";

    fn client(stub: StubTransport) -> (FhirClient, Arc<StubTransport>) {
        let stub = Arc::new(stub);
        let client = FhirClient::with_transport(BASE, stub.clone());
        (client, stub)
    }

    #[tokio::test]
    async fn test_get_all_patients_with_page_size() {
        let (client, stub) = client(StubTransport::default().with(
            "http://fhir.test/baseR4/Patient?_count=2",
            200,
            bundle(json!([{"resource": {"resourceType": "Patient", "id": "p1"}}]), None),
        ));
        let client = client.with_page_size(Some(2));

        let patients = client.get_all_patients().await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(stub.requested(), vec!["http://fhir.test/baseR4/Patient?_count=2"]);
    }

    #[tokio::test]
    async fn test_get_all_without_page_size_has_no_query() {
        let (client, _stub) = client(StubTransport::default().with(
            "http://fhir.test/baseR4/Procedure",
            200,
            bundle(json!([{"resource": {"resourceType": "Procedure", "id": "x"}}]), None),
        ));

        let any = client.get_all(ResourceType::Procedure).await.unwrap();
        assert!(matches!(any[0], AnyResource::Procedure(_)));
    }

    #[tokio::test]
    async fn test_condition_text_keeps_only_included_patients() {
        let url = "http://fhir.test/baseR4/Condition?code:text=diabetes&_include=Condition:patient";
        let (client, _stub) = client(StubTransport::default().with(
            url,
            200,
            bundle(
                json!([
                    {"resource": {"resourceType": "Condition", "id": "c1"}},
                    {"resource": {"resourceType": "Patient", "id": "p1"}}
                ]),
                None,
            ),
        ));

        let patients = client.get_patients_by_condition_text("diabetes").await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].id(), Some("p1"));
    }

    #[tokio::test]
    async fn test_get_all_observations_drops_other_types() {
        let (client, stub) = client(StubTransport::default().with(
            "http://fhir.test/baseR4/Observation",
            200,
            bundle(
                json!([
                    {"resource": {"resourceType": "Observation", "id": "o1"}},
                    {"resource": {"resourceType": "Patient", "id": "p1"}},
                    {"resource": {"resourceType": "Observation", "id": "o2"}}
                ]),
                None,
            ),
        ));

        let observations = client.get_all_observations().await.unwrap();
        let ids: Vec<_> = observations.iter().filter_map(|o| o.id()).collect();
        assert_eq!(ids, vec!["o1", "o2"]);
        assert_eq!(stub.requested(), vec!["http://fhir.test/baseR4/Observation"]);
    }

    #[tokio::test]
    async fn test_zero_max_pages_still_reads_first_page() {
        let (client, stub) = client(
            StubTransport::default()
                .with(
                    "http://fhir.test/baseR4/Patient",
                    200,
                    bundle(
                        json!([{"resource": {"resourceType": "Patient", "id": "p1"}}]),
                        Some("http://fhir.test/baseR4/Patient?page=2"),
                    ),
                )
                .with(
                    "http://fhir.test/baseR4/Patient?page=2",
                    200,
                    bundle(json!([{"resource": {"resourceType": "Patient", "id": "p2"}}]), None),
                ),
        );
        let client = client.with_max_pages(0);
        assert_eq!(client.max_pages(), 1);

        let err = client.get_all_patients().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Fhir(FhirError::PageLimitExceeded { limit: 1, .. })
        ));
        assert_eq!(stub.requested(), vec!["http://fhir.test/baseR4/Patient"]);
    }

    #[tokio::test]
    async fn test_search_error_propagates() {
        let (client, _stub) = client(StubTransport::default());
        let err = client.get_observations_by_patient("p1").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_read_and_resolve_subject() {
        let (client, stub) = client(StubTransport::default().with(
            "http://fhir.test/baseR4/Patient/p9",
            200,
            json!({"resourceType": "Patient", "id": "p9", "name": [{"text": "Ann Lee"}]}),
        ));

        let observation = Observation::from_value(json!({
            "resourceType": "Observation",
            "subject": {"reference": "Patient/p9"}
        }))
        .unwrap();

        let patient = client.resolve_subject(&observation).await.unwrap();
        assert_eq!(patient.to_string(), "Ann Lee");
        assert_eq!(stub.requested(), vec!["http://fhir.test/baseR4/Patient/p9"]);
    }

    #[tokio::test]
    async fn test_resolve_subject_rejects_non_patient() {
        let (client, stub) = client(StubTransport::default());
        let condition = Condition::from_value(json!({
            "resourceType": "Condition",
            "subject": {"reference": "Group/g1"}
        }))
        .unwrap();

        let err = client.resolve_subject(&condition).await.unwrap_err();
        assert!(matches!(err, FetchError::Fhir(FhirError::InvalidReference(_))));
        assert!(stub.requested().is_empty());
    }

    #[tokio::test]
    async fn test_read_rejects_wrong_type() {
        let (client, _stub) = client(StubTransport::default().with(
            "http://fhir.test/baseR4/Patient/p1",
            200,
            json!({"resourceType": "Observation", "id": "p1"}),
        ));

        let err = client.read::<Patient>("p1").await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Fhir(FhirError::ResourceTypeMismatch { .. })
        ));
        assert!(client.read::<Patient>("").await.is_err());
    }

    #[tokio::test]
    async fn test_observations_for_patient_without_id() {
        let (client, _stub) = client(StubTransport::default());
        let patient = Patient::from_value(json!({"resourceType": "Patient"})).unwrap();
        assert!(client.get_observations_for(&patient).await.is_err());
    }

    #[test]
    fn test_debug_hides_session() {
        let (client, _stub) = client(StubTransport::default());
        let debug = format!("{client:?}");
        assert!(debug.contains("fhir.test"));
        assert!(debug.contains("max_pages: 1000"));
    }
}
