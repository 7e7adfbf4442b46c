//! # Channel Gateway
//!
//! A [`ResourceGateway`] that forwards every call as a [`GatewayRequest`] over a Tokio mpsc
//! channel and waits for the answer on a oneshot channel. Whoever holds the receiver decides
//! what each call returns, and *when*. The mock utilities build on it, and it is how tests
//! hold one response back while a newer load overtakes it.

use crate::framework::error::GatewayError;
use crate::framework::gateway::ResourceGateway;
use crate::framework::message::GatewayRequest;
use crate::framework::resource::Resource;
use crate::model::{FilterOptions, Page, QueryParams};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// Cheap to clone; holds only the sender.
pub struct ChannelGateway<R: Resource> {
    sender: mpsc::Sender<GatewayRequest<R>>,
}

impl<R: Resource> Clone for ChannelGateway<R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<R: Resource> ChannelGateway<R> {
    pub fn new(sender: mpsc::Sender<GatewayRequest<R>>) -> Self {
        Self { sender }
    }

    async fn call<T: Send>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, GatewayError>>) -> GatewayRequest<R> + Send,
    ) -> Result<T, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| GatewayError::Closed)?;
        response.await.map_err(|_| GatewayError::Dropped)?
    }
}

#[async_trait]
impl<R: Resource> ResourceGateway<R> for ChannelGateway<R> {
    async fn list(&self, params: &QueryParams) -> Result<Page<R::Summary>, GatewayError> {
        let params = params.clone();
        self.call(|respond_to| GatewayRequest::List { params, respond_to })
            .await
    }

    async fn filter(&self) -> Result<FilterOptions, GatewayError> {
        self.call(|respond_to| GatewayRequest::Filter { respond_to })
            .await
    }

    async fn retrieve(&self, id: &R::Id) -> Result<R, GatewayError> {
        let id = id.clone();
        self.call(|respond_to| GatewayRequest::Retrieve { id, respond_to })
            .await
    }

    async fn create(&self, data: &R::Create) -> Result<R, GatewayError> {
        let data = data.clone();
        self.call(|respond_to| GatewayRequest::Create { data, respond_to })
            .await
    }

    async fn update(&self, id: &R::Id, data: &R::Update) -> Result<R, GatewayError> {
        let (id, data) = (id.clone(), data.clone());
        self.call(|respond_to| GatewayRequest::Update {
            id,
            data,
            respond_to,
        })
        .await
    }

    async fn destroy(&self, id: &R::Id) -> Result<(), GatewayError> {
        let id = id.clone();
        self.call(|respond_to| GatewayRequest::Destroy { id, respond_to })
            .await
    }

    async fn clear(&self, id: &R::Id) -> Result<serde_json::Value, GatewayError> {
        let id = id.clone();
        self.call(|respond_to| GatewayRequest::Clear { id, respond_to })
            .await
    }
}
