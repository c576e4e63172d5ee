//! HTTP transport abstraction for testability

use async_trait::async_trait;

use crate::credentials::Credentials;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over the HTTP client for dependency injection.
///
/// Implementations report the status code as received and leave its
/// interpretation to the caller.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request to the given URL using HTTP Basic Auth
    async fn get(&self, url: &str, credentials: &Credentials) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Wrap an already configured reqwest client (proxies, root certificates, ...)
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, credentials: &Credentials) -> crate::Result<HttpResponse> {
        tracing::debug!("GET {} as {}", url, credentials.username());
        let response = self
            .client
            .get(url)
            .basic_auth(credentials.username(), Some(credentials.password()))
            .send()
            .await
            .map_err(|e| crate::DtApiError::Http(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| crate::DtApiError::Http(format!("Reading response body: {}", e)))?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
