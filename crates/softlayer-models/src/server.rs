//! Bare metal and virtual servers.

use crate::model::{Attributes, ModelBase, ModelObject};
use softlayer_client::Client;
use softlayer_core::types::names;

/// Object mask used when listing bare metal servers.
pub const BARE_METAL_MASK: &str = "mask[id,hostname,domain,fullyQualifiedDomainName,\
primaryIpAddress,primaryBackendIpAddress,datacenter,hardwareStatus,processorPhysicalCoreAmount,\
memoryCapacity,provisionDate]";

/// Object mask used when listing virtual servers.
pub const VIRTUAL_SERVER_MASK: &str = "mask[id,hostname,domain,fullyQualifiedDomainName,\
primaryIpAddress,primaryBackendIpAddress,datacenter,status,maxCpu,maxMemory,provisionDate]";

/// Kind of server, which decides the remote service that represents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerKind {
    /// Dedicated hardware (`SoftLayer_Hardware_Server`)
    BareMetal,
    /// Virtual guest (`SoftLayer_Virtual_Guest`)
    Virtual,
}

impl ServerKind {
    /// Service representing servers of this kind.
    #[must_use]
    pub const fn service_name(self) -> &'static str {
        match self {
            Self::BareMetal => names::HARDWARE_SERVER,
            Self::Virtual => names::VIRTUAL_GUEST,
        }
    }

    /// Account method listing servers of this kind.
    #[must_use]
    pub const fn account_method(self) -> &'static str {
        match self {
            Self::BareMetal => "getHardware",
            Self::Virtual => "getVirtualGuests",
        }
    }

    /// Object mask used when listing servers of this kind.
    #[must_use]
    pub const fn default_mask(self) -> &'static str {
        match self {
            Self::BareMetal => BARE_METAL_MASK,
            Self::Virtual => VIRTUAL_SERVER_MASK,
        }
    }
}

/// A server on the account, bare metal or virtual.
#[derive(Debug)]
pub struct Server {
    kind: ServerKind,
    base: ModelBase,
}

impl Server {
    /// Wrap an attribute mapping.
    #[must_use]
    pub fn new(kind: ServerKind, client: Client, attributes: Attributes) -> Self {
        Self::from_base(kind, ModelBase::new(kind.service_name(), client, attributes))
    }

    pub(crate) const fn from_base(kind: ServerKind, base: ModelBase) -> Self {
        Self { kind, base }
    }

    /// Bare metal or virtual.
    #[must_use]
    pub const fn kind(&self) -> ServerKind {
        self.kind
    }

    /// Returns true for dedicated hardware.
    #[must_use]
    pub const fn is_bare_metal(&self) -> bool {
        matches!(self.kind, ServerKind::BareMetal)
    }

    /// Host name.
    #[must_use]
    pub fn hostname(&self) -> Option<&str> {
        self.base.get_str("hostname")
    }

    /// Domain.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.base.get_str("domain")
    }

    /// Host name and domain.
    #[must_use]
    pub fn fully_qualified_domain_name(&self) -> Option<&str> {
        self.base.get_str("fullyQualifiedDomainName")
    }

    /// Public IP address.
    #[must_use]
    pub fn primary_ip_address(&self) -> Option<&str> {
        self.base.get_str("primaryIpAddress")
    }

    /// Private network IP address.
    #[must_use]
    pub fn primary_backend_ip_address(&self) -> Option<&str> {
        self.base.get_str("primaryBackendIpAddress")
    }

    /// Short name of the datacenter, e.g. `dal05`.
    #[must_use]
    pub fn datacenter_name(&self) -> Option<&str> {
        self.base
            .get_opt("datacenter")
            .and_then(|dc| dc.get("name"))
            .and_then(|name| name.as_str())
    }
}

impl ModelObject for Server {
    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }
}
