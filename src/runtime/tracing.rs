//! # Logging
//!
//! [`setup_tracing`] installs the global `tracing` subscriber.
//!
//! The format is compact and hides the module prefix (`with_target(false)`); the gateway
//! and container spans carry a `resource` field instead.
//!
//! ```bash
//! # Failures only (load errors, rejected requests)
//! RUST_LOG=warn catalog list movie
//!
//! # Every request with its URL and status
//! RUST_LOG=debug catalog list movie --page 3
//! ```
//!
//! A failed load shows up as
//!
//! ```text
//! ERROR load_items{params={} resource="movie"}: Failed to load items error=Backend answered 500 Internal Server Error: ... status=Some(500)
//! ```
//!
//! Logs go to stderr so they never mix with the rendered listing on stdout.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
