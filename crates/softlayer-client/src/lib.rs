//! SoftLayer client, service registry and transport.
//!
//! A [`Client`] holds credentials and endpoint settings and hands out
//! memoized [`Service`] proxies by name. Remote calls go through an
//! [`ApiTransport`]; [`RestTransport`] talks to the SoftLayer REST endpoint.

#![deny(missing_docs)]

pub mod client;
pub mod service;
pub mod transport;

pub use client::{Client, ClientBuilder, DefaultClient};
pub use service::{BoundService, Service};
pub use transport::{ApiRequest, ApiTransport, AuthenticationHeaders, RestTransport};

/// Convenient result alias that reuses the shared SoftLayer error type.
pub type Result<T> = softlayer_core::Result<T>;
