//! Service proxies.
//!
//! A [`Service`] is the unbound handle for one named remote service, memoized
//! by its [`Client`]. A [`BoundService`] pairs a service with call parameters,
//! most importantly the id of the remote object the calls should target.

use crate::client::{Client, ClientInner};
use crate::Result;
use serde_json::Value;
use softlayer_core::filter::ApiParameterFilter;
use softlayer_core::types::ServiceName;
use softlayer_core::Error;
use std::fmt;
use std::sync::{Arc, Weak};

/// Handle for a named remote service.
pub struct Service {
    name: ServiceName,
    client: Weak<ClientInner>,
}

impl Service {
    pub(crate) fn new(name: ServiceName, client: Weak<ClientInner>) -> Self {
        Self { name, client }
    }

    /// Fully qualified service name, e.g. `SoftLayer_Account`.
    #[must_use]
    pub fn service_name(&self) -> &str {
        self.name.as_str()
    }

    /// The validated name.
    #[must_use]
    pub const fn name(&self) -> &ServiceName {
        &self.name
    }

    /// The client that created this service, unless it has been dropped.
    #[must_use]
    pub fn client(&self) -> Option<Client> {
        self.client.upgrade().map(Client::from_inner)
    }

    /// Bind to a specific remote object.
    #[must_use]
    pub fn object_with_id(self: &Arc<Self>, id: impl Into<Value>) -> BoundService {
        self.bind(ApiParameterFilter::new().with_object_id(id))
    }

    /// Bind with an object mask.
    #[must_use]
    pub fn object_mask(self: &Arc<Self>, mask: impl AsRef<str>) -> BoundService {
        self.bind(ApiParameterFilter::new().with_object_mask(mask))
    }

    /// Bind with a result limit.
    #[must_use]
    pub fn result_limit(self: &Arc<Self>, offset: u32, limit: u32) -> BoundService {
        self.bind(ApiParameterFilter::new().with_result_limit(offset, limit))
    }

    /// Bind with an object filter.
    #[must_use]
    pub fn object_filter(self: &Arc<Self>, filter: Value) -> BoundService {
        self.bind(ApiParameterFilter::new().with_object_filter(filter))
    }

    /// Bind with an arbitrary parameter filter.
    #[must_use]
    pub fn bind(self: &Arc<Self>, filter: ApiParameterFilter) -> BoundService {
        BoundService {
            service: Arc::clone(self),
            filter,
        }
    }

    /// Call a method with no parameters.
    ///
    /// # Errors
    ///
    /// Propagates transport errors, or [`Error::ClientReleased`] if the client is gone.
    pub async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        self.call_with_params(method, &ApiParameterFilter::new(), args)
            .await
    }

    /// Call a method with a parameter filter and positional arguments.
    ///
    /// # Errors
    ///
    /// Propagates transport errors, or [`Error::ClientReleased`] if the client is gone.
    pub async fn call_with_params(
        &self,
        method: &str,
        filter: &ApiParameterFilter,
        args: Vec<Value>,
    ) -> Result<Value> {
        let client = self
            .client()
            .ok_or_else(|| Error::ClientReleased(self.name.to_string()))?;
        let request = client.build_request(&self.name, method, filter.clone(), args);
        client.transport().call(request).await
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("name", &self.name)
            .field("client_alive", &(self.client.strong_count() > 0))
            .finish()
    }
}

/// A service together with the parameters its calls carry.
#[derive(Debug, Clone)]
pub struct BoundService {
    service: Arc<Service>,
    filter: ApiParameterFilter,
}

impl BoundService {
    /// The underlying (memoized) service.
    #[must_use]
    pub const fn target(&self) -> &Arc<Service> {
        &self.service
    }

    /// Id of the remote object calls target, if bound to one.
    #[must_use]
    pub fn server_object_id(&self) -> Option<&Value> {
        self.filter.object_id.as_ref()
    }

    /// Parameters applied to every call.
    #[must_use]
    pub const fn filter(&self) -> &ApiParameterFilter {
        &self.filter
    }

    /// Copy with a different object id.
    #[must_use]
    pub fn object_with_id(&self, id: impl Into<Value>) -> Self {
        self.refine(ApiParameterFilter::new().with_object_id(id))
    }

    /// Copy with an object mask.
    #[must_use]
    pub fn object_mask(&self, mask: impl AsRef<str>) -> Self {
        self.refine(ApiParameterFilter::new().with_object_mask(mask))
    }

    /// Copy with a result limit.
    #[must_use]
    pub fn result_limit(&self, offset: u32, limit: u32) -> Self {
        self.refine(ApiParameterFilter::new().with_result_limit(offset, limit))
    }

    /// Copy with an object filter.
    #[must_use]
    pub fn object_filter(&self, filter: Value) -> Self {
        self.refine(ApiParameterFilter::new().with_object_filter(filter))
    }

    fn refine(&self, extra: ApiParameterFilter) -> Self {
        Self {
            service: Arc::clone(&self.service),
            filter: self.filter.merge(&extra),
        }
    }

    /// Call a method with this binding's parameters.
    ///
    /// # Errors
    ///
    /// See [`Service::call_with_params`].
    pub async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        self.service.call_with_params(method, &self.filter, args).await
    }

    /// Call a method with extra parameters layered over this binding's.
    ///
    /// # Errors
    ///
    /// See [`Service::call_with_params`].
    pub async fn call_with_params(
        &self,
        method: &str,
        filter: &ApiParameterFilter,
        args: Vec<Value>,
    ) -> Result<Value> {
        let merged = self.filter.merge(filter);
        self.service.call_with_params(method, &merged, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockApiTransport;
    use serde_json::json;
    use softlayer_core::config::{ClientOptions, GlobalDefaults};

    fn client_with(transport: MockApiTransport) -> Client {
        Client::builder(
            ClientOptions::new()
                .with_username("fake_user")
                .with_api_key("fake_key"),
        )
        .with_global_defaults(GlobalDefaults::new())
        .with_transport(Arc::new(transport))
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn bound_service_targets_object() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_call()
            .withf(|request| {
                request.service.as_str() == "SoftLayer_Account"
                    && request.method == "getHardware"
                    && request.filter.object_id == Some(json!(12345))
                    && request.filter.object_mask.as_deref() == Some("mask[id]")
                    && request.authentication.credentials() == Some(("fake_user", "fake_key"))
            })
            .times(1)
            .returning(|_| Ok(json!([])));

        let client = client_with(transport);
        let bound = client
            .service_named("Account")
            .unwrap()
            .object_with_id(12345)
            .object_mask("id");

        assert_eq!(bound.server_object_id(), Some(&json!(12345)));
        assert_eq!(bound.target().service_name(), "SoftLayer_Account");
        assert_eq!(bound.call("getHardware", vec![]).await.unwrap(), json!([]));
    }

    #[tokio::test]
    async fn unbound_call_has_no_object_id() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_call()
            .withf(|request| request.method == "getObject" && request.filter.is_empty())
            .times(1)
            .returning(|_| Ok(json!({"id": 1})));

        let client = client_with(transport);
        let service = client.service_named("SoftLayer_Account").unwrap();
        let value = service.call("getObject", vec![]).await.unwrap();
        assert_eq!(value["id"], json!(1));
    }

    #[tokio::test]
    async fn released_client_is_reported() {
        let client = client_with(MockApiTransport::new());
        let service = client.service_named("Ticket").unwrap();
        drop(client);

        assert!(service.client().is_none());
        let err = service.call("getObject", vec![]).await.unwrap_err();
        assert!(matches!(err, Error::ClientReleased(_)));
    }

    #[test]
    fn refine_keeps_existing_parameters() {
        let client = client_with(MockApiTransport::new());
        let bound = client
            .service_named("Account")
            .unwrap()
            .object_with_id(7)
            .result_limit(0, 10)
            .object_filter(json!({"id": {"operation": 7}}));

        assert_eq!(bound.server_object_id(), Some(&json!(7)));
        assert_eq!(bound.filter().result_limit.map(|l| l.limit), Some(10));
        assert!(bound.filter().object_filter.is_some());
    }
}
