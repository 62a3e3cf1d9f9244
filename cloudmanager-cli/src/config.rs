//! Configuration module
//!
//! Handles CLI configuration: API location, credentials and timeouts.

use std::time::Duration;

use anyhow::{Context, Result};
use cloudmanager_client::{ApiCredentials, CloudManagerClient, StaticToken};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Cloud Manager API
    pub base_url: String,
    /// Bearer token for API requests
    pub access_token: Option<String>,
    /// Integration client id
    pub api_key: Option<String>,
    /// IMS organization id
    pub org_id: Option<String>,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base_url cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.timeout.as_secs() == 0 {
            anyhow::bail!("timeout must be greater than 0");
        }

        if self.access_token.is_some() {
            let missing = |value: &Option<String>| value.as_deref().is_none_or(str::is_empty);
            if missing(&self.api_key) {
                anyhow::bail!("api_key is required when an access token is set");
            }
            if missing(&self.org_id) {
                anyhow::bail!("org_id is required when an access token is set");
            }
        }

        Ok(())
    }

    /// Credentials to send, if a token was configured
    ///
    /// Call [`Config::validate`] first; it guarantees the api key and org id
    /// accompany a token.
    pub fn credentials(&self) -> Option<ApiCredentials> {
        self.access_token.as_ref().map(|token| {
            ApiCredentials::new(
                self.api_key.clone().unwrap_or_default(),
                self.org_id.clone().unwrap_or_default(),
                StaticToken::new(token.clone()),
            )
        })
    }

    /// Build the API client described by this configuration
    pub fn client(&self) -> Result<CloudManagerClient> {
        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let client = CloudManagerClient::with_client(&self.base_url, http_client);
        Ok(match self.credentials() {
            Some(credentials) => client.with_credentials(credentials),
            None => client,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://cloudmanager.adobe.io".to_string(),
            access_token: None,
            api_key: None,
            org_id: None,
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Empty base URL should fail
        config.base_url = String::new();
        assert!(config.validate().is_err());

        // Invalid URL should fail
        config.base_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://localhost:8080".to_string();
        assert!(config.validate().is_ok());

        // Zero timeout should fail
        config.timeout = Duration::from_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_from_token() {
        let config = Config {
            access_token: Some("abc".to_string()),
            api_key: Some("client-id".to_string()),
            org_id: Some("org@AdobeOrg".to_string()),
            ..Config::default()
        };

        assert!(config.validate().is_ok());

        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.api_key(), "client-id");
        assert_eq!(credentials.org_id(), "org@AdobeOrg");
    }

    #[test]
    fn test_client_uses_base_url() {
        let config = Config {
            base_url: "http://localhost:8080/".to_string(),
            ..Config::default()
        };

        let client = config.client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_token_requires_api_key_and_org_id() {
        let mut config = Config {
            access_token: Some("abc".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        config.api_key = Some("client-id".to_string());
        assert!(config.validate().is_err());

        config.org_id = Some(String::new());
        assert!(config.validate().is_err());

        config.org_id = Some("org@AdobeOrg".to_string());
        assert!(config.validate().is_ok());
    }
}
