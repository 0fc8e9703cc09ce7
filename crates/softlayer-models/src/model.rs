//! Shared model object machinery.
//!
//! A model object is a snapshot of one remote entity: the attribute map the
//! API returned, the client it came from, the name of the service that
//! represents it and, once first needed, that service bound to the entity's id. Known fields get typed accessors on the concrete
//! types; everything else is reachable through [`ModelBase::get`].

use crate::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use softlayer_client::{BoundService, Client};
use softlayer_core::filter::ApiParameterFilter;
use softlayer_core::Error;
use std::sync::OnceLock;
use tracing::debug;

/// Raw attribute mapping returned by the API.
pub type Attributes = Map<String, Value>;

/// Client, attribute snapshot and lazily bound service of one remote entity.
#[derive(Debug)]
pub struct ModelBase {
    service_name: &'static str,
    client: Client,
    attributes: Attributes,
    service: OnceLock<BoundService>,
}

impl ModelBase {
    /// Wrap an attribute mapping for an entity of `service_name`; values are
    /// stored verbatim.
    #[must_use]
    pub fn new(service_name: &'static str, client: Client, attributes: Attributes) -> Self {
        Self {
            service_name,
            client,
            attributes,
            service: OnceLock::new(),
        }
    }

    /// Wrap a decoded API response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] unless the value is a JSON object.
    pub fn from_value(service_name: &'static str, client: Client, value: Value) -> Result<Self> {
        match value {
            Value::Object(attributes) => Ok(Self::new(service_name, client, attributes)),
            other => Err(Error::InvalidResponse(format!(
                "expected an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Service that represents this object remotely.
    #[must_use]
    pub const fn service_name(&self) -> &'static str {
        self.service_name
    }

    /// The client this object belongs to.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// The raw attribute mapping.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The `id` attribute exactly as the API supplied it.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.attributes.get("id")
    }

    /// Look up an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchAttribute`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.attributes
            .get(key)
            .ok_or_else(|| Error::NoSuchAttribute(key.to_string()))
    }

    /// Look up an attribute that may be absent.
    #[must_use]
    pub fn get_opt(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// String attribute; `None` when absent, null or not a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Returns true if the key is present (even with a null value).
    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// This object's service, bound to its id.
    ///
    /// Resolved through the client's registry on first use and cached for
    /// the lifetime of the object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchAttribute`] if the object has no id.
    pub fn bound_service(&self) -> Result<&BoundService> {
        if let Some(bound) = self.service.get() {
            return Ok(bound);
        }

        let id = self
            .id()
            .cloned()
            .ok_or_else(|| Error::NoSuchAttribute("id".to_string()))?;
        let bound = self
            .client
            .service_named(self.service_name)?
            .object_with_id(id);
        debug!(service = %self.service_name, "Bound model object to service");

        Ok(self.service.get_or_init(|| bound))
    }

    /// Re-fetch the attributes with `getObject`.
    ///
    /// # Errors
    ///
    /// Propagates call errors; returns [`Error::InvalidResponse`] if the
    /// response is not an object or carries a different id.
    pub async fn refresh(&mut self, mask: Option<&str>) -> Result<()> {
        let bound = self.bound_service()?.clone();
        let filter = mask.map_or_else(ApiParameterFilter::new, |mask| {
            ApiParameterFilter::new().with_object_mask(mask)
        });

        let value = bound.call_with_params("getObject", &filter, vec![]).await?;
        let Value::Object(attributes) = value else {
            return Err(Error::InvalidResponse(
                "getObject did not return an object".to_string(),
            ));
        };

        if attributes.get("id") != self.id() {
            return Err(Error::InvalidResponse(format!(
                "refreshed object has id {:?}, expected {:?}",
                attributes.get("id"),
                self.id()
            )));
        }

        self.attributes = attributes;
        Ok(())
    }
}

/// Behaviour shared by every model type.
#[async_trait]
pub trait ModelObject: Send + Sync {
    /// Shared state.
    fn base(&self) -> &ModelBase;

    /// Shared state, mutably.
    fn base_mut(&mut self) -> &mut ModelBase;

    /// Service that represents this object remotely.
    fn service_name(&self) -> &'static str {
        self.base().service_name()
    }

    /// The client this object belongs to.
    fn client(&self) -> &Client {
        self.base().client()
    }

    /// The `id` attribute.
    fn id(&self) -> Option<&Value> {
        self.base().id()
    }

    /// Generic attribute lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchAttribute`] if the key is absent.
    fn get(&self, key: &str) -> Result<&Value> {
        self.base().get(key)
    }

    /// Service bound to this object's id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchAttribute`] if the object has no id.
    fn service(&self) -> Result<&BoundService> {
        self.base().bound_service()
    }

    /// Re-fetch the attribute snapshot.
    ///
    /// # Errors
    ///
    /// See [`ModelBase::refresh`].
    async fn refresh(&mut self, mask: Option<&str>) -> Result<()> {
        self.base_mut().refresh(mask).await
    }
}

/// Turn a list response into model objects, preserving order.
pub(crate) fn models_from_list<T, F>(
    service_name: &'static str,
    client: &Client,
    value: Value,
    build: F,
) -> Result<Vec<T>>
where
    F: Fn(ModelBase) -> T,
{
    let Value::Array(items) = value else {
        return Err(Error::InvalidResponse(format!(
            "expected a list, got {}",
            json_kind(&value)
        )));
    };

    items
        .into_iter()
        .map(|item| ModelBase::from_value(service_name, client.clone(), item).map(&build))
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
