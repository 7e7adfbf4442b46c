//! Runtime setup of the client.
//!
//! # Main Components
//!
//! - [`Catalog`] - Wires the API client, token store, gateways and auth session
//! - [`ClientConfig`] - TOML config file plus environment override
//! - [`ResourceKind`] - Resource names accepted on the command line
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod catalog;
pub mod config;
pub mod routes;
pub mod tracing;

pub use catalog::Catalog;
pub use config::{ClientConfig, ConfigError};
pub use routes::{ResourceKind, UnknownResource};
pub use self::tracing::setup_tracing;
