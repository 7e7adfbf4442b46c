//! # Errors
//!
//! Error types shared by the gateways and the state containers.
//!
//! - [`GatewayError`] is what a backend call fails with. It keeps the HTTP status when there
//!   is one.
//! - [`LoadError`] is what a state container *publishes* to its views. It deliberately
//!   drops the cause: views show a generic message and the cause goes to the log.
//! - [`StateError`] is returned to the caller of a container operation.

use reqwest::StatusCode;

/// Errors returned by a [`ResourceGateway`](crate::framework::ResourceGateway) or
/// [`AuthGateway`](crate::framework::AuthGateway) call.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Gateway closed")]
    Closed,
    #[error("Gateway dropped response channel")]
    Dropped,
}

impl GatewayError {
    /// The HTTP status of the failed call, when the backend produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Failure marker stored in a container snapshot.
///
/// Only the failing sub-call is recorded; the display strings are what a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to load data")]
    ListFailed,
    #[error("Failed to load filters")]
    FilterFailed,
    #[error("Failed to load data")]
    RetrieveFailed,
}

/// Errors returned by state container operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No gateway has been bound with `set_resource`.
    #[error("No API bound for this resource")]
    Unbound,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
