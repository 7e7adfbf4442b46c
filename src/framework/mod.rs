//! Generic building blocks shared by every catalog resource.
//!
//! # Main Components
//!
//! - [`Resource`] - Trait a model implements to be served by a gateway
//! - [`ResourceGateway`] - The per-resource backend capability bound into a state container
//! - [`AuthGateway`] - Login, logout, current user and sign-up
//! - [`ChannelGateway`] - A gateway forwarding calls as [`GatewayRequest`] messages
//! - [`GatewayError`], [`LoadError`], [`StateError`] - Error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test containers without a backend.

pub mod channel;
pub mod error;
pub mod gateway;
pub mod message;
pub mod mock;
pub mod resource;

pub use channel::ChannelGateway;
pub use error::{GatewayError, LoadError, StateError};
pub use gateway::{AuthGateway, ResourceGateway};
pub use message::{GatewayRequest, Response};
pub use mock::{create_mock_gateway, MockCall, MockGateway};
pub use resource::Resource;
