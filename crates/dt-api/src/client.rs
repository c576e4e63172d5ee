//! Client for the Disruptive Technologies REST API

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::clock::{Clock, SystemClock};
use crate::credentials::Credentials;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::models::{Device, DevicesEnvelope, Event, EventsEnvelope, Project, ProjectsEnvelope};
use crate::query::{device_types_query, EventQuery};

/// Base URL of the v2 REST API
pub const DEFAULT_BASE_URL: &str = "https://api.disruptive-technologies.com/v2";

/// Stateless wrapper around the project, device and event endpoints.
///
/// Every operation is exactly one authenticated GET. Nothing is cached,
/// retried or paginated. The client only holds read-only configuration, so
/// clones can be used from concurrent tasks freely.
#[derive(Clone)]
pub struct DtApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for DtApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DtApiClient")
            .field("base_url", &self.base_url)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for DtApiClient {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::default()))
    }
}

impl DtApiClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
            clock: Arc::new(SystemClock),
        }
    }

    /// Point the client at another server, e.g. a local mock
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> crate::Result<T> {
        let response = self.http.get(url, credentials).await?;
        if !response.is_success() {
            tracing::debug!("GET {} returned status {}", url, response.status);
            return Err(crate::DtApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// List all projects visible to the credentials
    pub async fn list_projects(&self, credentials: &Credentials) -> crate::Result<Vec<Project>> {
        let url = self.endpoint("/projects");
        let envelope: ProjectsEnvelope = self.get_json(&url, credentials).await?;
        tracing::debug!("Received {} projects", envelope.projects.len());
        Ok(envelope.projects)
    }

    /// List the devices of `project` (a resource name such as `projects/<id>`).
    ///
    /// An empty `types` slice is sent as `device_types=` and relies on the API
    /// treating the empty value as "no filter".
    pub async fn list_devices(
        &self,
        credentials: &Credentials,
        project: &str,
        types: &[String],
    ) -> crate::Result<Vec<Device>> {
        let url = format!(
            "{}?{}",
            self.endpoint(&format!("{}/devices", project)),
            device_types_query(types)
        );
        let envelope: DevicesEnvelope = self.get_json(&url, credentials).await?;
        tracing::debug!("Received {} devices for {}", envelope.devices.len(), project);
        Ok(envelope.devices)
    }

    /// Fetch the event history of `device` (a resource name such as
    /// `projects/<id>/devices/<id>`)
    pub async fn fetch_events(
        &self,
        credentials: &Credentials,
        device: &str,
        query: &EventQuery,
    ) -> crate::Result<Vec<Event>> {
        let start_time = query.resolve_start_time(self.clock.as_ref());
        let url = format!(
            "{}?{}",
            self.endpoint(&format!("{}/events", device)),
            query.to_query_string(&start_time)
        );
        let envelope: EventsEnvelope = self.get_json(&url, credentials).await?;
        tracing::debug!("Received {} events for {}", envelope.events.len(), device);
        Ok(envelope.events)
    }
}
