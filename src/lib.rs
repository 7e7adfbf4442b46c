//! # Catalog Client
//!
//! A typed client for a movie-catalog REST backend: listing, detail and edit operations for
//! movies, people, reviews, ratings, genres, countries, professions and users, plus
//! token-based login.
//!
//! ## Core Concepts
//!
//! ### One endpoint family, written once
//! Every backend resource exposes the same endpoints (`list`, `filter`, `retrieve`,
//! `create`, `update`, `destroy`, `clear`). A model implements [`Resource`](framework::Resource)
//! to name its path and wire types, and the generic
//! [`HttpGateway<R>`](http::HttpGateway), [`ResourceState<R>`](state::ResourceState) and
//! [`DetailState<R>`](state::DetailState) work for it unchanged.
//!
//! ### State containers
//! A view owns its containers explicitly. It binds a gateway with `set_resource`, asks for a
//! load and renders the snapshot published on a `watch` channel. Page math (current page,
//! "31 - 40", the page-number window) is derived from the backend's `count` and cursors.
//! See [`state`].
//!
//! ### Testing without a backend
//! Containers take an `Arc<dyn ResourceGateway<R>>`, so tests bind a
//! [`MockGateway`](framework::MockGateway) instead of HTTP. See [`framework::mock`].
//!
//! ## Module Tour
//!
//! - [`framework`] - `Resource` trait, gateway traits, errors, test doubles
//! - [`model`] - wire types of every resource
//! - [`state`] - `ResourceState`, `DetailState` and the page arithmetic
//! - [`http`] - reqwest gateways, auth session, token persistence
//! - [`runtime`] - config, logging, routing table and the [`Catalog`](runtime::Catalog) wiring
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- list movie --param genre=Drama --page 2
//! ```

pub mod framework;
pub mod http;
pub mod model;
pub mod prelude;
pub mod runtime;
pub mod state;
