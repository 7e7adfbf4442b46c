//! # Resource Trait
//!
//! The `Resource` trait describes one backend entity type (movie, person, review, ...) as the
//! catalog API exposes it. Every resource shares the same endpoint family
//! (`list`, `filter`, `retrieve`, `create`, `update`, `destroy`, `clear`), so the state
//! containers and the HTTP gateway are written *once* and reused for every type.
//!
//! Associated types keep each endpoint strongly typed: a `Movie` listing yields
//! `MovieSummary` rows, a `Movie` create call takes a `MovieCreate` payload, and the compiler
//! rejects a `ReviewCreate` sent to the movie endpoint.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any catalog entity must implement to be listed, loaded and edited through a
/// [`ResourceGateway`](crate::framework::ResourceGateway).
///
/// The implementing type itself is the *detail* representation returned by
/// `retrieve`, `create` and `update`.
pub trait Resource: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Primary key used in detail URLs (`{path}/{id}/`).
    type Id: Clone + Display + Debug + Send + Sync;

    /// The row type returned inside a listing page.
    type Summary: DeserializeOwned + Clone + Debug + Send + Sync;

    /// Payload for `POST {path}/`.
    type Create: Serialize + Clone + Debug + Send + Sync;

    /// Payload for `PATCH {path}/{id}/`. Fields left as `None` are not sent.
    type Update: Serialize + Clone + Debug + Send + Sync;

    /// Endpoint segment relative to the API base, without slashes (e.g. `"movie"`).
    const PATH: &'static str;

    /// Whether the backend exposes `GET {path}/filter/` for this resource.
    ///
    /// Gateways answer `filter()` with empty options when this is `false`.
    const FILTERABLE: bool = true;
}
