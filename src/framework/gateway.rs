//! # Gateway Traits
//!
//! Capability interfaces injected into the state containers. A view binds a
//! `ResourceGateway<R>` with `set_resource`; the container never knows whether it talks to
//! the HTTP backend ([`HttpGateway`](crate::http::HttpGateway)) or to a test double
//! ([`MockGateway`](crate::framework::mock::MockGateway)).
//!
//! Both traits are `#[async_trait]` so they stay object safe and can be stored as
//! `Arc<dyn ResourceGateway<R>>`.

use crate::framework::error::GatewayError;
use crate::framework::resource::Resource;
use crate::model::{FilterOptions, LoginResponse, Page, QueryParams, SignUp, User};
use async_trait::async_trait;

/// The uniform per-resource endpoint family.
///
/// # Example
///
/// ```rust,ignore
/// let state = ResourceState::<Movie>::new();
/// state.set_resource(Arc::new(HttpGateway::<Movie>::new(api.clone())));
/// state.load_items(QueryParams::new()).await?;
/// ```
#[async_trait]
pub trait ResourceGateway<R: Resource>: Send + Sync {
    /// `GET {path}/?params`: one page of the filtered collection.
    async fn list(&self, params: &QueryParams) -> Result<Page<R::Summary>, GatewayError>;

    /// `GET {path}/filter/`: allowed filter values for this resource.
    async fn filter(&self) -> Result<FilterOptions, GatewayError>;

    /// `GET {path}/{id}/`
    async fn retrieve(&self, id: &R::Id) -> Result<R, GatewayError>;

    /// `POST {path}/`
    async fn create(&self, data: &R::Create) -> Result<R, GatewayError>;

    /// `PATCH {path}/{id}/`
    async fn update(&self, id: &R::Id, data: &R::Update) -> Result<R, GatewayError>;

    /// `DELETE {path}/{id}/`
    async fn destroy(&self, id: &R::Id) -> Result<(), GatewayError>;

    /// `GET {path}/{id}/clear/`. The payload shape is backend-defined.
    async fn clear(&self, id: &R::Id) -> Result<serde_json::Value, GatewayError>;
}

/// Session endpoints of the catalog API.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST login/` with credentials, answering with a token.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, GatewayError>;

    /// `GET me/`: the user owning the current token.
    async fn me(&self) -> Result<User, GatewayError>;

    /// `POST logout/`
    async fn logout(&self) -> Result<(), GatewayError>;

    /// `POST signup/`
    async fn signup(&self, data: &SignUp) -> Result<User, GatewayError>;
}
