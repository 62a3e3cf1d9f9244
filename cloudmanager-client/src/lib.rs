//! Cloud Manager HTTP Client
//!
//! A type-safe async client for the Cloud Manager pipeline API.
//!
//! Data types (pipelines, executions, step states) are plain structs from
//! `cloudmanager-core`. Every action is a method on [`CloudManagerClient`]
//! that takes those structs or their ids explicitly.
//!
//! # Example
//!
//! ```no_run
//! use cloudmanager_client::{ApiCredentials, CloudManagerClient, StaticToken};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credentials = ApiCredentials::new("client-id", "org@AdobeOrg", StaticToken::new("token"));
//!     let client = CloudManagerClient::new("https://cloudmanager.adobe.io")
//!         .with_credentials(credentials);
//!
//!     let execution = client.get_current_execution("4", "3").await?;
//!     client.advance(&execution).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
mod executions;
mod logs;
mod pipelines;

// Re-export commonly used types
pub use auth::{ApiCredentials, StaticToken, TokenProvider};
pub use error::{ClientError, Result};

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// HTTP client for the Cloud Manager API
///
/// This client provides methods for the pipeline endpoints, organized
/// into logical groups:
/// - Pipelines (list, lookup, start an execution)
/// - Executions (get, list, cancel, advance)
/// - Step logs
#[derive(Debug, Clone)]
pub struct CloudManagerClient {
    /// Base URL of the API (e.g., "https://cloudmanager.adobe.io")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Authentication applied to API requests, if any
    credentials: Option<ApiCredentials>,
}

impl CloudManagerClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "https://cloudmanager.adobe.io")
    ///
    /// # Example
    /// ```
    /// use cloudmanager_client::CloudManagerClient;
    ///
    /// let client = CloudManagerClient::new("https://cloudmanager.adobe.io");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use cloudmanager_client::CloudManagerClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = CloudManagerClient::with_client("https://cloudmanager.adobe.io", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials: None,
        }
    }

    /// Attach credentials sent with every API request
    pub fn with_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Build an authenticated request against the API
    async fn request(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        debug!("{} {}", method, url);

        let request = self.client.request(method, url);
        match &self.credentials {
            Some(credentials) => credentials.apply(request).await,
            None => Ok(request),
        }
    }

    /// Turn a link href from a response into an absolute URL
    ///
    /// Hrefs are usually absolute paths (`/api/program/...`) and are joined
    /// to the base URL; fully qualified URLs are used unchanged.
    fn resolve_href(&self, href: &str) -> Result<Url> {
        let url = if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{}{}", self.base_url, href)
        } else {
            format!("{}/{}", self.base_url, href)
        };

        Url::parse(&url).map_err(|e| ClientError::InvalidUrl {
            url,
            message: e.to_string(),
        })
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an error naming the
    /// operation and URL if the request failed, or deserializes the
    /// response body if successful.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        operation: &'static str,
        url: &str,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            warn!("Cannot {}: {} returned {}", operation, url, status);
            return Err(ClientError::api_error(operation, url, status));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is not needed (e.g., PUT actions)
    ///
    /// This method checks the status code and returns an error if the request failed.
    async fn handle_empty_response(
        &self,
        response: reqwest::Response,
        operation: &'static str,
        url: &str,
    ) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            warn!("Cannot {}: {} returned {}", operation, url, status);
            return Err(ClientError::api_error(operation, url, status));
        }

        Ok(())
    }
}
