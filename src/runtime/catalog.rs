use crate::framework::{GatewayError, Resource, ResourceGateway};
use crate::http::{ApiClient, AuthSession, FileTokenStore, HttpAuth, HttpGateway, SessionToken, TokenStore};
use crate::runtime::config::ClientConfig;
use crate::state::{DetailState, ResourceState};
use std::sync::Arc;
use tracing::info;

/// Wires the client together: one [`ApiClient`] and token shared by every gateway, plus the
/// login session.
///
/// `Catalog` is responsible for:
/// - **Dependency wiring**: every gateway and the auth session share the same token slot, so
///   a login is visible to all subsequent requests
/// - **Container setup**: [`resource_state`](Self::resource_state) and
///   [`detail_state`](Self::detail_state) hand out containers already bound to their
///   HTTP gateway
///
/// # Example
///
/// ```ignore
/// let catalog = Catalog::new(ClientConfig::load()?)?;
///
/// let movies = catalog.resource_state::<Movie>();
/// movies.load_items(QueryParams::new()).await?;
/// println!("{}", movies.snapshot().shown_items());
/// ```
pub struct Catalog {
    config: ClientConfig,
    api: ApiClient,
    auth: AuthSession,
}

impl Catalog {
    /// Creates a catalog persisting the token under [`ClientConfig::config_dir`].
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        let store = Arc::new(FileTokenStore::in_dir(ClientConfig::config_dir()));
        Self::with_token_store(config, store)
    }

    pub fn with_token_store(
        config: ClientConfig,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, GatewayError> {
        let token = SessionToken::default();
        let api = ApiClient::new(&config.base_url, token.clone(), config.timeout())?;
        let auth = AuthSession::new(Arc::new(HttpAuth::new(api.clone())), token, store);
        info!(
            base_url = %api.base_url(),
            authenticated = auth.is_authenticated(),
            "Catalog client ready"
        );
        Ok(Self { config, api, auth })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    /// The HTTP gateway of resource `R`.
    pub fn gateway<R: Resource>(&self) -> Arc<dyn ResourceGateway<R>> {
        Arc::new(HttpGateway::<R>::new(self.api.clone()))
    }

    /// A fresh listing container bound to `R`'s endpoints.
    pub fn resource_state<R: Resource>(&self) -> ResourceState<R> {
        let state = ResourceState::new();
        state.set_max_visible_pages(self.config.max_visible_pages);
        state.set_resource(self.gateway());
        state
    }

    /// A fresh detail container bound to `R`'s endpoints.
    pub fn detail_state<R: Resource>(&self) -> DetailState<R> {
        let state = DetailState::new();
        state.set_resource(R::PATH, self.gateway());
        state
    }
}
