//! # DetailState
//!
//! Holds one entity fetched by id. One gateway call per load, no filter side-call.

use super::pagination;
use super::LoadPhase;
use crate::framework::{LoadError, Resource, ResourceGateway, StateError};
use crate::model::QueryParams;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, error, instrument};

/// Snapshot of a detail screen.
#[derive(Debug, Clone)]
pub struct DetailView<R: Resource> {
    pub entity: Option<R>,
    pub loading: bool,
    pub error: Option<LoadError>,
    pub phase: LoadPhase,
    /// Name the view bound the gateway under, e.g. `"movie"`.
    pub name: Option<String>,
    epoch: u64,
}

impl<R: Resource> Default for DetailView<R> {
    fn default() -> Self {
        Self {
            entity: None,
            loading: false,
            error: None,
            phase: LoadPhase::Idle,
            name: None,
            epoch: 0,
        }
    }
}

/// Handle to a detail container. Clones share the same state.
pub struct DetailState<R: Resource> {
    shared: Arc<Shared<R>>,
}

struct Shared<R: Resource> {
    gateway: RwLock<Option<Arc<dyn ResourceGateway<R>>>>,
    view: watch::Sender<DetailView<R>>,
}

impl<R: Resource> Clone for DetailState<R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<R: Resource> Default for DetailState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> DetailState<R> {
    pub fn new() -> Self {
        let (view, _) = watch::channel(DetailView::default());
        Self {
            shared: Arc::new(Shared {
                gateway: RwLock::new(None),
                view,
            }),
        }
    }

    /// Binds the retrieval gateway and records the resource name.
    pub fn set_resource(&self, name: impl Into<String>, gateway: Arc<dyn ResourceGateway<R>>) {
        let name = name.into();
        debug!(resource = %name, "Gateway bound");
        *self
            .shared
            .gateway
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(gateway);
        self.shared.view.send_modify(|view| view.name = Some(name));
    }

    pub fn snapshot(&self) -> DetailView<R> {
        self.shared.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailView<R>> {
        self.shared.view.subscribe()
    }

    /// See [`pagination::get_params`].
    pub fn get_params(cursor: Option<&str>) -> QueryParams {
        pagination::get_params(cursor)
    }

    /// Fetches the entity `id` into the snapshot.
    ///
    /// Unbound containers log and return `Err(StateError::Unbound)`. A failed retrieval
    /// sets `error` and keeps the previously shown entity.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn load_items(&self, id: &R::Id) -> Result<(), StateError> {
        let gateway = self
            .shared
            .gateway
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| {
                error!("No API bound for resource");
                StateError::Unbound
            })?;

        let mut epoch = 0;
        self.shared.view.send_modify(|view| {
            view.epoch += 1;
            epoch = view.epoch;
            view.loading = true;
            view.error = None;
            view.phase = LoadPhase::Loading;
        });

        let retrieved = gateway.retrieve(id).await;
        let applied = self.shared.view.send_if_modified(|view| {
            if view.epoch != epoch {
                return false;
            }
            match retrieved {
                Ok(entity) => {
                    view.entity = Some(entity);
                    view.phase = LoadPhase::Ready;
                }
                Err(e) => {
                    error!(error = %e, status = ?e.status(), "Failed to load entity");
                    view.error = Some(LoadError::RetrieveFailed);
                    view.phase = LoadPhase::Errored;
                }
            }
            view.loading = false;
            true
        });
        if !applied {
            debug!(epoch, "Discarding superseded retrieve response");
        }
        Ok(())
    }
}
