//! Client-side state containers.
//!
//! A view owns one container per screen: a [`ResourceState`] for a paginated, filterable
//! listing or a [`DetailState`] for one entity. It binds a gateway with `set_resource`, asks
//! for a load, and renders from the snapshots the container publishes on a
//! `tokio::sync::watch` channel.
//!
//! # Load lifecycle
//!
//! ```text
//! Idle -> Loading -> { Ready | Errored } -> Loading -> ...
//! ```
//!
//! There is no terminal state; a container lives until its view drops it.
//!
//! # Overlapping loads
//!
//! Every load takes the next value of a per-container epoch counter. A response is applied
//! only while its epoch is still the newest, so a slow answer to an older request can never
//! overwrite the result of a newer one.

pub mod detail_state;
pub mod pagination;
pub mod resource_state;

pub use detail_state::{DetailState, DetailView};
pub use pagination::{get_params, update_page, DEFAULT_MAX_VISIBLE_PAGES, PAGE_SIZE};
pub use resource_state::{CollectionView, ResourceState};

/// Where a container is in its load cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored,
}
