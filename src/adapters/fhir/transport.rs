//! HTTP transport for FHIR requests
//!
//! All network access goes through the [`Transport`] trait so the collector
//! and the client can run against an in-memory stub in tests. The production
//! implementation is [`HttpTransport`], a pooled `reqwest` client.

use crate::config::{AuthType, ServerConfig};
use crate::domain::{FhirError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Media type requested from the server
pub const FHIR_JSON: &str = "application/fhir+json";

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only 200 counts as success; every other status is a failure
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Decode the body as JSON
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidResponse`] when the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> std::result::Result<T, FhirError> {
        serde_json::from_str(&self.body)
            .map_err(|e| FhirError::InvalidResponse(format!("Response body is not valid JSON: {e}")))
    }
}

/// Executes GET requests against a FHIR server
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET request
    ///
    /// Any status is returned as-is; an error means no response was received.
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Connection-pooling transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport from server settings
    ///
    /// Applies the request timeout, TLS verification and the authorization
    /// header to every request made through it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`](crate::domain::FetchError::Configuration)
    /// when the credentials cannot form a header or the client cannot be built.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(FHIR_JSON));

        if let Some(auth) = auth_header_value(config) {
            let mut value = HeaderValue::from_str(&auth).map_err(|e| {
                crate::domain::FetchError::Configuration(format!("Invalid credentials: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = ClientBuilder::new()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            tracing::warn!(base_url = %config.base_url, "TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            crate::domain::FetchError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self { client })
    }

    /// Transport with default settings and no credentials
    pub fn anonymous() -> Result<Self> {
        Self::new(&ServerConfig::default())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        tracing::debug!(url = %url, "GET");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FhirError::ConnectionFailed(format!("{url}: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| FhirError::ConnectionFailed(format!("{url}: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

/// Build the Authorization header value for the configured auth type
fn auth_header_value(config: &ServerConfig) -> Option<String> {
    match config.auth_type {
        AuthType::None => None,
        AuthType::Basic => {
            let username = config.username.as_deref()?;
            let password = config.password.as_ref()?;
            let credentials = format!("{username}:{}", password.expose_secret().as_ref());
            let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
            Some(format!("Basic {encoded}"))
        }
        AuthType::Bearer => {
            let token = config.token.as_ref()?;
            Some(format!("Bearer {}", token.expose_secret().as_ref()))
        }
    }
}

/// GET `url` through `session`, or through a one-off transport when no
/// session is given
pub async fn get(url: &str, session: Option<&dyn Transport>) -> Result<HttpResponse> {
    match session {
        Some(transport) => transport.get(url).await,
        None => HttpTransport::anonymous()?.get(url).await,
    }
}

/// GET `url` and require a 200 answer
///
/// # Errors
///
/// Returns [`FhirError::RequestFailed`] carrying status, url and body for
/// any other status.
pub async fn get_ok(url: &str, session: Option<&dyn Transport>) -> Result<HttpResponse> {
    let response = get(url, session).await?;
    if !response.is_ok() {
        tracing::warn!(url = %url, status = response.status, "Request failed");
        return Err(FhirError::RequestFailed {
            status: response.status,
            url: url.to_string(),
            body: response.body,
        }
        .into());
    }
    Ok(response)
}
