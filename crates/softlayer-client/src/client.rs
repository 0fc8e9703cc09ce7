//! SoftLayer client and service registry.

use crate::service::Service;
use crate::transport::{ApiRequest, ApiTransport, AuthenticationHeaders, RestTransport};
use crate::Result;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use softlayer_core::config::{ClientOptions, GlobalDefaults};
use softlayer_core::filter::ApiParameterFilter;
use softlayer_core::http::HttpConfig;
use softlayer_core::types::ServiceName;
use softlayer_core::Error;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default user agent: library, version and platform.
#[must_use]
pub fn default_user_agent() -> String {
    format!(
        "softlayer-api/{} (Rust {}/{})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

pub(crate) struct ClientInner {
    username: Option<String>,
    api_key: Option<SecretString>,
    endpoint_url: String,
    endpoint: Url,
    network_timeout: Option<Duration>,
    user_agent: RwLock<String>,
    transport: Arc<dyn ApiTransport>,
    services: Mutex<HashMap<ServiceName, Arc<Service>>>,
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    options: ClientOptions,
    defaults: Option<GlobalDefaults>,
    http_config: HttpConfig,
    transport: Option<Arc<dyn ApiTransport>>,
}

impl ClientBuilder {
    /// Create a builder from client options.
    #[must_use]
    pub fn new(options: ClientOptions) -> Self {
        Self {
            options,
            defaults: None,
            http_config: HttpConfig::new(),
            transport: None,
        }
    }

    /// Resolve unset options against these defaults instead of the environment.
    #[must_use]
    pub fn with_global_defaults(mut self, defaults: GlobalDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Override the HTTP configuration of the default REST transport.
    #[must_use]
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Use a custom transport instead of [`RestTransport`].
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn ApiTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] for invalid options, or
    /// [`Error::ConfigError`] if the endpoint or HTTP client cannot be set up.
    pub fn build(self) -> Result<Client> {
        let defaults = self.defaults.unwrap_or_else(GlobalDefaults::from_env);
        let resolved = self.options.resolve(&defaults)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(RestTransport::with_config(self.http_config)?),
        };

        let blank = |value: &Option<String>| value.as_deref().map_or(true, str::is_empty);
        if blank(&resolved.username) || blank(&resolved.api_key) {
            warn!(
                endpoint = %resolved.endpoint_url,
                "SoftLayer client created without complete credentials; requests will be unauthenticated"
            );
        }

        let inner = ClientInner {
            username: resolved.username,
            api_key: resolved.api_key.map(SecretString::from),
            endpoint_url: resolved.endpoint_url,
            endpoint: resolved.endpoint,
            network_timeout: resolved.timeout,
            user_agent: RwLock::new(resolved.user_agent.unwrap_or_else(default_user_agent)),
            transport,
            services: Mutex::new(HashMap::new()),
        };

        Ok(Client {
            inner: Arc::new(inner),
        })
    }
}

/// Handle to the SoftLayer API.
///
/// Cloning is cheap; clones share credentials, user agent and the service
/// registry, and compare equal to each other.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Create a client, falling back to `SL_API_*` environment variables for unset options.
    ///
    /// # Errors
    ///
    /// See [`ClientBuilder::build`].
    pub fn new(options: ClientOptions) -> Result<Self> {
        ClientBuilder::new(options).build()
    }

    /// Create a client, falling back to the given defaults for unset options.
    ///
    /// # Errors
    ///
    /// See [`ClientBuilder::build`].
    pub fn with_defaults(options: ClientOptions, defaults: &GlobalDefaults) -> Result<Self> {
        ClientBuilder::new(options)
            .with_global_defaults(defaults.clone())
            .build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder(options: ClientOptions) -> ClientBuilder {
        ClientBuilder::new(options)
    }

    pub(crate) fn from_inner(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// API username, if configured.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.inner.username.as_deref()
    }

    /// API key, if configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.inner.api_key.as_ref().map(|key| key.expose_secret())
    }

    /// Endpoint URL as configured.
    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.inner.endpoint_url
    }

    /// Network timeout, if configured.
    #[must_use]
    pub fn network_timeout(&self) -> Option<Duration> {
        self.inner.network_timeout
    }

    /// Current user agent string.
    #[must_use]
    pub fn user_agent(&self) -> String {
        match self.inner.user_agent.read() {
            Ok(agent) => agent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replace the user agent string.
    pub fn set_user_agent(&self, user_agent: impl Into<String>) {
        let user_agent = user_agent.into();
        match self.inner.user_agent.write() {
            Ok(mut agent) => *agent = user_agent,
            Err(poisoned) => *poisoned.into_inner() = user_agent,
        }
    }

    /// Authentication block for requests; empty without a username and API key.
    #[must_use]
    pub fn authentication_headers(&self) -> AuthenticationHeaders {
        AuthenticationHeaders::from_credentials(self.username(), self.api_key())
    }

    /// Return the memoized service for `name`.
    ///
    /// `"Account"`, `"SoftLayer_Account"` and `"softlayer_Account"` yield the
    /// same instance; the part after the prefix is case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is empty.
    pub fn service_named(&self, name: &str) -> Result<Arc<Service>> {
        let name = ServiceName::parse(name)?;

        let mut services = self
            .inner
            .services
            .lock()
            .map_err(|_| Error::InternalError("service registry lock poisoned".to_string()))?;

        let service = services.entry(name.clone()).or_insert_with(|| {
            debug!(service = %name, "Registering SoftLayer service");
            Arc::new(Service::new(name, Arc::downgrade(&self.inner)))
        });

        Ok(Arc::clone(service))
    }

    /// Shorthand for [`Client::service_named`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is empty.
    pub fn service(&self, name: &str) -> Result<Arc<Service>> {
        self.service_named(name)
    }

    /// Returns true if both handles refer to the same client.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The process-wide default client, if one is installed.
    #[must_use]
    pub fn default_client() -> Option<Self> {
        DefaultClient::global().get()
    }

    /// Install or clear the process-wide default client.
    pub fn set_default_client(client: Option<Self>) {
        let slot = DefaultClient::global();
        match client {
            Some(client) => {
                slot.set(client);
            }
            None => {
                slot.clear();
            }
        }
    }

    pub(crate) fn transport(&self) -> &Arc<dyn ApiTransport> {
        &self.inner.transport
    }

    pub(crate) fn build_request(
        &self,
        service: &ServiceName,
        method: &str,
        filter: ApiParameterFilter,
        args: Vec<Value>,
    ) -> ApiRequest {
        ApiRequest {
            service: service.clone(),
            method: method.to_string(),
            filter,
            args,
            endpoint: self.inner.endpoint.clone(),
            authentication: self.authentication_headers(),
            user_agent: self.user_agent(),
            timeout: self.inner.network_timeout,
        }
    }
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Client {}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("username", &self.inner.username)
            .field("api_key", &self.inner.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint_url", &self.inner.endpoint_url)
            .field("network_timeout", &self.inner.network_timeout)
            .finish_non_exhaustive()
    }
}

/// Resettable holder for an optional default client.
///
/// Model factories fall back to [`DefaultClient::global`] when no client is
/// passed explicitly; tests can use their own holder instead.
#[derive(Debug, Default)]
pub struct DefaultClient {
    slot: RwLock<Option<Client>>,
}

static GLOBAL_DEFAULT_CLIENT: DefaultClient = DefaultClient::new();

impl DefaultClient {
    /// Create an empty holder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// The process-wide holder.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_DEFAULT_CLIENT
    }

    /// The installed client, if any.
    #[must_use]
    pub fn get(&self) -> Option<Client> {
        match self.slot.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Install a client, returning the previous one.
    pub fn set(&self, client: Client) -> Option<Client> {
        match self.slot.write() {
            Ok(mut slot) => slot.replace(client),
            Err(poisoned) => poisoned.into_inner().replace(client),
        }
    }

    /// Remove and return the installed client.
    pub fn clear(&self) -> Option<Client> {
        match self.slot.write() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }

    /// Use `explicit` if given, otherwise the installed client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDefaultClient`] when neither is available.
    pub fn resolve(&self, explicit: Option<&Client>) -> Result<Client> {
        explicit
            .cloned()
            .or_else(|| self.get())
            .ok_or(Error::NoDefaultClient)
    }
}
