//! Canonical SoftLayer service names.
//!
//! SoftLayer services are addressed by fully qualified names such as
//! `SoftLayer_Account`. Callers may also use the short form (`Account`) or
//! any casing of the `SoftLayer_` prefix; all of them parse to the same
//! canonical name. The remainder is case-sensitive, as the API is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Prefix shared by every SoftLayer service name.
pub const SERVICE_PREFIX: &str = "SoftLayer_";

/// Well-known service names used by the model types.
pub mod names {
    /// Account service
    pub const ACCOUNT: &str = "SoftLayer_Account";
    /// Bare metal server service
    pub const HARDWARE_SERVER: &str = "SoftLayer_Hardware_Server";
    /// Virtual guest service
    pub const VIRTUAL_GUEST: &str = "SoftLayer_Virtual_Guest";
    /// Ticket service
    pub const TICKET: &str = "SoftLayer_Ticket";
}

/// A validated, fully qualified service name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceName(String);

impl ServiceName {
    /// Parse a short or fully qualified service name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is empty, whitespace only
    /// or consists of the bare `SoftLayer_` prefix.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidArgument(
                "service name must not be empty".to_string(),
            ));
        }

        let short = strip_prefix(trimmed);
        if short.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "service name `{input}` has nothing after the prefix"
            )));
        }

        Ok(Self(format!("{SERVICE_PREFIX}{short}")))
    }

    /// The fully qualified name, e.g. `SoftLayer_Account`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name without the `SoftLayer_` prefix, e.g. `Account`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.0[SERVICE_PREFIX.len()..]
    }
}

fn strip_prefix(name: &str) -> &str {
    match name.get(..SERVICE_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(SERVICE_PREFIX) => &name[SERVICE_PREFIX.len()..],
        _ => name,
    }
}

impl FromStr for ServiceName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ServiceName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ServiceName> for String {
    fn from(name: ServiceName) -> Self {
        name.0
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
