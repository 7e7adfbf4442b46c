//! HTTP access to the catalog backend.
//!
//! - [`ApiClient`] - base URL, token header, status mapping
//! - [`HttpGateway`] - the generic per-resource [`ResourceGateway`](crate::framework::ResourceGateway)
//! - [`HttpAuth`] and [`AuthSession`] - login state
//! - [`TokenStore`] - where the token survives between runs

pub mod auth;
pub mod client;
pub mod gateway;
pub mod token;

pub use auth::{AuthError, AuthSession, HttpAuth};
pub use client::ApiClient;
pub use gateway::HttpGateway;
pub use token::{FileTokenStore, MemoryTokenStore, SessionToken, TokenStore, TokenStoreError};
