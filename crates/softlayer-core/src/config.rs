//! Configuration structures for SoftLayer clients.
//!
//! Client options are resolved against process-wide [`GlobalDefaults`]: an
//! option given explicitly always wins (even an empty string), otherwise the
//! global value is used, and the endpoint finally falls back to
//! [`API_PUBLIC_ENDPOINT`].

use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use tracing::debug;
use validator::Validate;

/// Public REST endpoint of the SoftLayer API.
pub const API_PUBLIC_ENDPOINT: &str = "https://api.softlayer.com/rest/v3/";

/// REST endpoint reachable only from the SoftLayer private network.
pub const API_PRIVATE_ENDPOINT: &str = "https://api.service.softlayer.com/rest/v3/";

/// Environment variable holding the default API username.
pub const ENV_API_USERNAME: &str = "SL_API_USERNAME";

/// Environment variable holding the default API key.
pub const ENV_API_KEY: &str = "SL_API_KEY";

/// Environment variable holding the default endpoint URL.
pub const ENV_API_BASE_URL: &str = "SL_API_BASE_URL";

/// Process-wide fallback values consulted when [`ClientOptions`] leave a field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalDefaults {
    /// Default API username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Default API key
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Default endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl GlobalDefaults {
    /// Create an empty set of defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            username: None,
            api_key: None,
            base_url: None,
        }
    }

    /// Read defaults from `SL_API_USERNAME`, `SL_API_KEY` and `SL_API_BASE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            username: std::env::var(ENV_API_USERNAME).ok(),
            api_key: std::env::var(ENV_API_KEY).ok(),
            base_url: std::env::var(ENV_API_BASE_URL).ok(),
        }
    }

    /// Set the default username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the default API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the default endpoint URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Options recognised when constructing a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClientOptions {
    /// API username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// API key
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Endpoint URL
    #[validate(url)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Network timeout in seconds
    #[validate(range(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// User agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ClientOptions {
    /// Create options with every field unset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            username: None,
            api_key: None,
            endpoint_url: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the API username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the endpoint URL.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the network timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Resolve these options against the given global defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the explicit options are invalid,
    /// or [`Error::ConfigError`] if the resolved endpoint is not usable.
    pub fn resolve(&self, defaults: &GlobalDefaults) -> Result<ResolvedOptions, Error> {
        self.validate()?;

        let (endpoint_url, source) = match (&self.endpoint_url, &defaults.base_url) {
            (Some(url), _) => (url.clone(), "options"),
            (None, Some(url)) => (url.clone(), "global defaults"),
            (None, None) => (API_PUBLIC_ENDPOINT.to_string(), "public endpoint"),
        };
        let endpoint = parse_endpoint(&endpoint_url)?;
        debug!(endpoint = %endpoint_url, source, "Resolved SoftLayer endpoint");

        Ok(ResolvedOptions {
            username: self.username.clone().or_else(|| defaults.username.clone()),
            api_key: self.api_key.clone().or_else(|| defaults.api_key.clone()),
            endpoint_url,
            endpoint,
            timeout: self.timeout.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        })
    }
}

/// Client settings after explicit options and global defaults were merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// API username, if any source provided one
    pub username: Option<String>,
    /// API key, if any source provided one
    pub api_key: Option<String>,
    /// Endpoint URL exactly as configured
    pub endpoint_url: String,
    /// Endpoint URL normalised with a trailing slash for joining paths
    pub endpoint: Url,
    /// Network timeout
    pub timeout: Option<Duration>,
    /// User agent override
    pub user_agent: Option<String>,
}

fn parse_endpoint(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)
        .map_err(|e| Error::ConfigError(format!("Invalid endpoint URL `{raw}`: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::ConfigError(format!(
            "Endpoint URL `{raw}` cannot be used as a base"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
