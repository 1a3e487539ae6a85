//! Main API client implementation

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::endpoints::{AuthApi, ProjectsApi, SitesApi};
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// SiteTrack API client
///
/// Thin wrapper over `reqwest`: every call is a single attempt with no retry.
/// Credentials are supplied per call rather than stored on the client.
#[derive(Clone)]
pub struct SiteTrackClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl SiteTrackClient {
    /// Create a new client with default configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("sitetrack-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access registration and login endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access project endpoints
    #[must_use]
    pub fn projects(&self) -> ProjectsApi {
        ProjectsApi::new(self.clone())
    }

    /// Access site endpoints
    #[must_use]
    pub fn sites(&self) -> SitesApi {
        SitesApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a GET request
    #[instrument(skip(self, credentials))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        credentials: Option<&Credentials>,
    ) -> ApiResult<T> {
        self.request(Method::GET, path, Option::<&()>::None, credentials)
            .await
    }

    /// Perform a POST request
    #[instrument(skip(self, body, credentials))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        credentials: Option<&Credentials>,
    ) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body), credentials)
            .await
    }

    /// Execute a single request and decode the JSON response
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        credentials: Option<&Credentials>,
    ) -> ApiResult<T> {
        let url = self.config.url(path);
        let request_id = Uuid::new_v4().to_string();

        let mut request = self
            .inner
            .request(method.clone(), &url)
            .header(X_REQUEST_ID, &request_id);

        if let Some(creds) = credentials {
            request = request.header(AUTHORIZATION, creds.authorization());
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        let start = Instant::now();
        let result = match request.send().await {
            Ok(response) => Self::handle_response(response).await,
            Err(e) => Err(ApiError::Request(e)),
        };

        match &result {
            Ok(_) => debug!(
                request_id = %request_id,
                method = %method,
                url = %url,
                elapsed_ms = start.elapsed().as_millis(),
                "Request succeeded"
            ),
            Err(e) => debug!(
                request_id = %request_id,
                method = %method,
                url = %url,
                elapsed_ms = start.elapsed().as_millis(),
                error = %e,
                "Request failed"
            ),
        }

        result
    }

    /// Handle HTTP response and deserialize
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(ApiError::Request)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ApiError::api_response(status.as_u16(), body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SiteTrackClient::with_config(ClientConfig::development());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ClientConfig::development().with_base_url("localhost");
        assert!(matches!(
            SiteTrackClient::with_config(config),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn test_base_url_accessor() {
        let client = SiteTrackClient::with_config(
            ClientConfig::development().with_base_url("http://127.0.0.1:9000"),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
    }
}
