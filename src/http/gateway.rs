//! # HTTP gateway
//!
//! [`ResourceGateway`] over the catalog REST API. One generic implementation serves every
//! resource: the endpoint family only differs by [`Resource::PATH`].

use super::client::ApiClient;
use crate::framework::{GatewayError, Resource, ResourceGateway};
use crate::model::{FilterOptions, Page, QueryParams};
use async_trait::async_trait;
use reqwest::Method;
use std::marker::PhantomData;
use tracing::{debug, instrument};

/// Talks to `{base}/{R::PATH}/...`.
pub struct HttpGateway<R: Resource> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for HttpGateway<R> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

impl<R: Resource> HttpGateway<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    fn collection(&self, params: &QueryParams) -> Result<url::Url, GatewayError> {
        self.api.endpoint(&format!("{}/", R::PATH), params)
    }

    fn member(&self, id: &R::Id, suffix: &str) -> Result<url::Url, GatewayError> {
        self.api
            .endpoint(&format!("{}/{id}/{suffix}", R::PATH), &QueryParams::new())
    }
}

#[async_trait]
impl<R: Resource> ResourceGateway<R> for HttpGateway<R> {
    #[instrument(skip(self), fields(resource = R::PATH))]
    async fn list(&self, params: &QueryParams) -> Result<Page<R::Summary>, GatewayError> {
        let url = self.collection(params)?;
        self.api.request(Method::GET, url, None::<&()>).await
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    async fn filter(&self) -> Result<FilterOptions, GatewayError> {
        if !R::FILTERABLE {
            debug!("Resource has no filter endpoint");
            return Ok(FilterOptions::default());
        }
        let url = self
            .api
            .endpoint(&format!("{}/filter/", R::PATH), &QueryParams::new())?;
        self.api.request(Method::GET, url, None::<&()>).await
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    async fn retrieve(&self, id: &R::Id) -> Result<R, GatewayError> {
        let url = self.member(id, "")?;
        self.api.request(Method::GET, url, None::<&()>).await
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    async fn create(&self, data: &R::Create) -> Result<R, GatewayError> {
        let url = self.collection(&QueryParams::new())?;
        self.api.request(Method::POST, url, Some(data)).await
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    async fn update(&self, id: &R::Id, data: &R::Update) -> Result<R, GatewayError> {
        let url = self.member(id, "")?;
        self.api.request(Method::PATCH, url, Some(data)).await
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    async fn destroy(&self, id: &R::Id) -> Result<(), GatewayError> {
        let url = self.member(id, "")?;
        self.api.execute(Method::DELETE, url, None::<&()>).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    async fn clear(&self, id: &R::Id) -> Result<serde_json::Value, GatewayError> {
        let url = self.member(id, "clear/")?;
        let body = self.api.execute(Method::GET, url, None::<&()>).await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}
