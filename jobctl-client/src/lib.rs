//! jobctl HTTP Client
//!
//! A small, type-safe client for the job endpoints of the Nomad HTTP API.
//!
//! The client covers exactly what submitting and removing a job needs:
//! validation, dry-run planning, registration and deregistration. Callers
//! that want to swap the transport (tests, dry runs) depend on the
//! [`JobsApi`] trait rather than on [`NomadClient`] directly.
//!
//! # Example
//!
//! ```no_run
//! use jobctl_client::{ClientConfig, JobsApi, NomadClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NomadClient::new(ClientConfig::from_env()?)?;
//!
//!     let (resp, meta) = client.deregister_job("job-id", false).await?;
//!     println!("eval {} at index {}", resp.eval_id, meta.last_index);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod jobs;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use jobs::JobsApi;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Header carrying the ACL token
pub const TOKEN_HEADER: &str = "x-nomad-token";

/// Header carrying the Raft index of a write
pub const INDEX_HEADER: &str = "x-nomad-index";

/// Metadata returned with every write request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteMeta {
    /// Raft index at which the write was applied
    pub last_index: u64,
    /// Wall time spent on the request
    pub request_time: Duration,
}

/// HTTP client for the Nomad API
#[derive(Debug, Clone)]
pub struct NomadClient {
    /// Parsed agent address
    base_url: Url,
    config: ClientConfig,
    /// HTTP client instance
    client: Client,
}

impl NomadClient {
    /// Create a new client from configuration
    ///
    /// Fails if the configuration does not validate or the token cannot be
    /// used as a header value.
    ///
    /// # Example
    /// ```
    /// use jobctl_client::{ClientConfig, NomadClient};
    ///
    /// let client = NomadClient::new(ClientConfig::new("http://127.0.0.1:4646")).unwrap();
    /// assert_eq!(client.address(), "http://127.0.0.1:4646");
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(token)
                .map_err(|e| ClientError::InvalidConfig(format!("invalid token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(TOKEN_HEADER, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Self::with_client(config, builder.build()?)
    }

    /// Create a new client with a custom HTTP client
    ///
    /// The token from `config` is not applied; configure it on `client`.
    pub fn with_client(config: ClientConfig, client: Client) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(config.address.trim_end_matches('/')).map_err(|e| {
            ClientError::InvalidConfig(format!("invalid address `{}`: {}", config.address, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidConfig(format!(
                "address `{}` cannot be used as a base URL",
                config.address
            )));
        }

        Ok(Self {
            base_url,
            config,
            client,
        })
    }

    /// Get the agent address
    pub fn address(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Build the URL for an API path given as segments (each one is
    /// percent-encoded)
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Start a request with the region and namespace query parameters applied
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(segments));

        if !self.config.region.is_empty() {
            builder = builder.query(&[("region", self.config.region.as_str())]);
        }
        if let Some(namespace) = &self.config.namespace {
            builder = builder.query(&[("namespace", namespace.as_str())]);
        }

        builder
    }

    /// Send a write request and decode the JSON answer with its metadata
    async fn write<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<(T, WriteMeta)> {
        let started = Instant::now();
        let response = builder.send().await?;

        let last_index = response
            .headers()
            .get(INDEX_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or_default();

        let body = self.handle_response(response).await?;

        Ok((
            body,
            WriteMeta {
                last_index,
                request_time: started.elapsed(),
            },
        ))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Nomad reports errors as plain text bodies, which become the message of
    /// [`ClientError::ApiError`].
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(
                status.as_u16(),
                error_text.trim().to_string(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
