//! Client configuration
//!
//! Connection settings for a Nomad agent. Mirrors the environment variables
//! understood by the `nomad` command line tool.

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Address used when `NOMAD_ADDR` is not set
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:4646";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Agent base URL (e.g., "http://127.0.0.1:4646")
    pub address: String,

    /// Region sent with every request; empty lets the agent use its own
    pub region: String,

    /// Namespace sent with every request
    pub namespace: Option<String>,

    /// ACL token, sent as `X-Nomad-Token`
    pub token: Option<String>,

    /// Overall HTTP timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration for the given address with all other settings unset
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            region: String::new(),
            namespace: None,
            token: None,
            timeout: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables:
    /// - NOMAD_ADDR (optional, default: http://127.0.0.1:4646)
    /// - NOMAD_REGION (optional)
    /// - NOMAD_NAMESPACE (optional)
    /// - NOMAD_TOKEN (optional)
    /// - NOMAD_HTTP_TIMEOUT (optional, seconds)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let address = non_empty("NOMAD_ADDR").unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        let timeout = match non_empty("NOMAD_HTTP_TIMEOUT") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    ClientError::InvalidConfig(format!(
                        "NOMAD_HTTP_TIMEOUT must be a number of seconds, got `{}`",
                        raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            address,
            region: non_empty("NOMAD_REGION").unwrap_or_default(),
            namespace: non_empty("NOMAD_NAMESPACE"),
            token: non_empty("NOMAD_TOKEN"),
            timeout,
        })
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "address cannot be empty".to_string(),
            ));
        }

        if !self.address.starts_with("http://") && !self.address.starts_with("https://") {
            return Err(ClientError::InvalidConfig(
                "address must start with http:// or https://".to_string(),
            ));
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ClientError::InvalidConfig(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}
