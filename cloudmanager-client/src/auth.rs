//! Request authentication
//!
//! Cloud Manager expects every API request to carry a bearer access token,
//! the integration's API key and the IMS organization id. Obtaining the
//! token is left to a [`TokenProvider`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::RequestBuilder;

use crate::error::Result;

const API_KEY_HEADER: &str = "x-api-key";
const ORG_ID_HEADER: &str = "x-gw-ims-org-id";

/// Source of bearer access tokens
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a token valid for the next request
    async fn access_token(&self) -> Result<String>;
}

/// A token obtained out of band and used as is
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Credentials attached to every API request
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    org_id: String,
    token: Arc<dyn TokenProvider>,
}

impl ApiCredentials {
    /// Create credentials for an integration
    ///
    /// # Arguments
    /// * `api_key` - The integration's client id, sent as `x-api-key`
    /// * `org_id` - The IMS organization id
    /// * `token` - Where to obtain bearer tokens from
    pub fn new(
        api_key: impl Into<String>,
        org_id: impl Into<String>,
        token: impl TokenProvider + 'static,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            org_id: org_id.into(),
            token: Arc::new(token),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    /// Add the authentication headers to a request
    pub async fn apply(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token.access_token().await?;

        Ok(request
            .bearer_auth(token)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ORG_ID_HEADER, &self.org_id))
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("org_id", &self.org_id)
            .field("token", &"<redacted>")
            .finish()
    }
}
