//! # ResourceState
//!
//! Paginated, filterable listing of one resource type.
//!
//! `load_items` issues two sequential gateway calls: the page itself (`list`), then the
//! filter metadata (`filter`). Each call's outcome is written into the published
//! [`CollectionView`] snapshot. A failure of either call only sets the snapshot's `error`;
//! the cause is logged, never surfaced. When both fail, the filter failure is the one left
//! in `error`.

use super::pagination;
use super::LoadPhase;
use crate::framework::{LoadError, Resource, ResourceGateway, StateError};
use crate::model::{FilterOptions, QueryParams};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, error, instrument};

/// Snapshot of a listing, as a view renders it.
///
/// The page math (`current_page`, `total_pages`, `shown_items`, `visible_pages`) is
/// derived on demand from `count` and the `next` cursor, so it always agrees with the
/// stored fields.
#[derive(Debug, Clone)]
pub struct CollectionView<R: Resource> {
    pub items: Vec<R::Summary>,
    /// Total rows matching `active_params`, across all pages.
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    /// The params of the last successful listing.
    pub active_params: QueryParams,
    pub filter_options: FilterOptions,
    pub loading: bool,
    pub error: Option<LoadError>,
    pub phase: LoadPhase,
    pub max_visible_pages: u64,
    epoch: u64,
}

impl<R: Resource> Default for CollectionView<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            next: None,
            previous: None,
            active_params: QueryParams::new(),
            filter_options: FilterOptions::default(),
            loading: false,
            error: None,
            phase: LoadPhase::Idle,
            max_visible_pages: pagination::DEFAULT_MAX_VISIBLE_PAGES,
            epoch: 0,
        }
    }
}

impl<R: Resource> CollectionView<R> {
    pub fn total_pages(&self) -> u64 {
        pagination::total_pages(self.count)
    }

    pub fn current_page(&self) -> u64 {
        pagination::current_page(self.next.as_deref(), self.count)
    }

    /// `"start - end"` of the rows on the current page, e.g. `"31 - 40"`.
    pub fn shown_items(&self) -> String {
        pagination::shown_items(self.current_page(), self.count)
    }

    pub fn visible_pages(&self) -> Vec<u64> {
        pagination::visible_pages(
            self.current_page(),
            self.total_pages(),
            self.max_visible_pages,
        )
    }
}

/// Handle to a listing container. Clones share the same state.
pub struct ResourceState<R: Resource> {
    shared: Arc<Shared<R>>,
}

struct Shared<R: Resource> {
    gateway: RwLock<Option<Arc<dyn ResourceGateway<R>>>>,
    view: watch::Sender<CollectionView<R>>,
}

impl<R: Resource> Clone for ResourceState<R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<R: Resource> Default for ResourceState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceState<R> {
    /// An empty, unbound container.
    pub fn new() -> Self {
        let (view, _) = watch::channel(CollectionView::default());
        Self {
            shared: Arc::new(Shared {
                gateway: RwLock::new(None),
                view,
            }),
        }
    }

    /// Binds the gateway used by every following load.
    pub fn set_resource(&self, gateway: Arc<dyn ResourceGateway<R>>) {
        *self
            .shared
            .gateway
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(gateway);
        debug!(resource = R::PATH, "Gateway bound");
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> CollectionView<R> {
        self.shared.view.borrow().clone()
    }

    /// Receiver notified on every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<CollectionView<R>> {
        self.shared.view.subscribe()
    }

    /// Sets the width of the page-number window. A width of 0 is stored as 1.
    pub fn set_max_visible_pages(&self, width: u64) {
        self.shared
            .view
            .send_modify(|view| view.max_visible_pages = width.max(1));
    }

    /// See [`pagination::update_page`].
    pub fn update_page(params: &QueryParams, page: u64) -> QueryParams {
        pagination::update_page(params, page)
    }

    /// See [`pagination::get_params`].
    pub fn get_params(cursor: Option<&str>) -> QueryParams {
        pagination::get_params(cursor)
    }

    /// Loads the page selected by `params`, then the filter options.
    ///
    /// Returns `Err(StateError::Unbound)` without touching the snapshot when no gateway is
    /// bound. Gateway failures are *not* returned: they land in the snapshot's `error`.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn load_items(&self, params: QueryParams) -> Result<(), StateError> {
        let gateway = self.require_gateway()?;
        let epoch = self.begin_load();

        let listed = gateway.list(&params).await;
        let applied = self.shared.view.send_if_modified(|view| {
            if view.epoch != epoch {
                return false;
            }
            match listed {
                Ok(page) => {
                    debug!(count = page.count, rows = page.results.len(), "Items loaded");
                    view.items = page.results;
                    view.count = page.count;
                    view.next = page.next;
                    view.previous = page.previous;
                    view.active_params = params;
                    view.phase = LoadPhase::Ready;
                }
                Err(e) => {
                    error!(error = %e, status = ?e.status(), "Failed to load items");
                    view.error = Some(LoadError::ListFailed);
                    view.phase = LoadPhase::Errored;
                }
            }
            view.loading = false;
            true
        });
        if !applied {
            debug!(epoch, "Discarding superseded list response");
            return Ok(());
        }

        let resumed = self.shared.view.send_if_modified(|view| {
            if view.epoch != epoch {
                return false;
            }
            view.loading = true;
            true
        });
        if !resumed {
            return Ok(());
        }

        let filtered = gateway.filter().await;
        let applied = self.shared.view.send_if_modified(|view| {
            if view.epoch != epoch {
                return false;
            }
            match filtered {
                Ok(options) => view.filter_options = options,
                Err(e) => {
                    error!(error = %e, status = ?e.status(), "Failed to load filters");
                    view.error = Some(LoadError::FilterFailed);
                    view.phase = LoadPhase::Errored;
                }
            }
            view.loading = false;
            true
        });
        if !applied {
            debug!(epoch, "Discarding superseded filter response");
        }
        Ok(())
    }

    /// Reloads with the active params moved to `page`.
    pub async fn load_page(&self, page: u64) -> Result<(), StateError> {
        let params = pagination::update_page(&self.snapshot().active_params, page);
        self.load_items(params).await
    }

    /// Follows the `next` cursor. Returns `false` when already on the last page.
    pub async fn next_page(&self) -> Result<bool, StateError> {
        let Some(next) = self.snapshot().next else {
            return Ok(false);
        };
        self.load_items(pagination::get_params(Some(&next))).await?;
        Ok(true)
    }

    /// Follows the `previous` cursor. Returns `false` when already on the first page.
    pub async fn previous_page(&self) -> Result<bool, StateError> {
        let Some(previous) = self.snapshot().previous else {
            return Ok(false);
        };
        self.load_items(pagination::get_params(Some(&previous)))
            .await?;
        Ok(true)
    }

    #[instrument(skip(self, data), fields(resource = R::PATH))]
    pub async fn create(&self, data: &R::Create) -> Result<R, StateError> {
        let gateway = self.require_gateway()?;
        Ok(gateway.create(data).await?)
    }

    #[instrument(skip(self, data), fields(resource = R::PATH))]
    pub async fn update(&self, id: &R::Id, data: &R::Update) -> Result<R, StateError> {
        let gateway = self.require_gateway()?;
        Ok(gateway.update(id, data).await?)
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn destroy(&self, id: &R::Id) -> Result<(), StateError> {
        let gateway = self.require_gateway()?;
        Ok(gateway.destroy(id).await?)
    }

    fn require_gateway(&self) -> Result<Arc<dyn ResourceGateway<R>>, StateError> {
        let gateway = self
            .shared
            .gateway
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        gateway.ok_or_else(|| {
            error!(resource = R::PATH, "No API bound for resource");
            StateError::Unbound
        })
    }

    /// Opens a new load cycle and returns its epoch.
    fn begin_load(&self) -> u64 {
        let mut epoch = 0;
        self.shared.view.send_modify(|view| {
            view.epoch += 1;
            epoch = view.epoch;
            view.loading = true;
            view.error = None;
            view.phase = LoadPhase::Loading;
        });
        epoch
    }
}
