//! Gateway configuration loaded from environment variables.
//!
//! # Environment variables
//!
//! - `ASSISTANT_API_URL`      = upstream base URL (mandatory, http/https)
//! - `ASSISTANT_API_KEY`      = bearer token (optional)
//! - `ASSISTANT_TIMEOUT_SECS` = request timeout in seconds (optional, default 60)

use std::time::Duration;

use crate::error_handler::{Result, must_var, opt_u64, opt_var, validate_http_endpoint};

/// Default upstream timeout when `ASSISTANT_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the upstream assistant service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:9000`.
    pub endpoint: String,
    /// Optional bearer token.
    pub api_key: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads the config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = must_var(&lookup, "ASSISTANT_API_URL")?;
        let endpoint = endpoint.trim();
        validate_http_endpoint("ASSISTANT_API_URL", endpoint)?;

        let timeout_secs = opt_u64(&lookup, "ASSISTANT_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key: opt_var(&lookup, "ASSISTANT_API_KEY"),
            timeout: Duration::from_secs(timeout_secs),
            ..Self::new(endpoint)
        })
    }
}
