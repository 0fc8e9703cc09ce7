//! # softlayer-core
//!
//! Core types and utilities for working with the SoftLayer API.
//!
//! This crate provides the error taxonomy, client configuration, HTTP tuning,
//! service-name handling and API parameter filters shared by the client and
//! model crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`config`] - Client options, global defaults and endpoint constants
//! - [`http`] - Transport timeouts and retry policy
//! - [`types`] - Canonical service names
//! - [`filter`] - Object masks, result limits and object filters

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod types;

pub use error::{Error, Result};
