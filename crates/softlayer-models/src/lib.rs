//! Typed model objects for the SoftLayer API.
//!
//! Model objects wrap the attribute maps returned by the API. Each exposes
//! typed accessors for well-known fields, a generic [`ModelBase::get`]
//! fallback, and relationship methods that fetch related objects through a
//! service bound to the object's id.

#![deny(missing_docs)]

pub mod account;
pub mod model;
pub mod server;
pub mod ticket;

pub use account::Account;
pub use model::{Attributes, ModelBase, ModelObject};
pub use server::{Server, ServerKind};
pub use ticket::{Ticket, TicketUpdate};

/// Convenient result alias that reuses the shared SoftLayer error type.
pub type Result<T> = softlayer_core::Result<T>;
