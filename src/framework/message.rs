//! # Gateway Messages
//!
//! Request messages carried by a [`ChannelGateway`](crate::framework::ChannelGateway).
//! One variant per endpoint of the resource family; each carries a oneshot sender for the
//! answer.

use crate::framework::error::GatewayError;
use crate::framework::resource::Resource;
use crate::model::{FilterOptions, Page, QueryParams};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel of a gateway request.
pub type Response<T> = oneshot::Sender<Result<T, GatewayError>>;

/// A gateway call in flight, waiting for whoever owns the receiving end to answer it.
#[derive(Debug)]
pub enum GatewayRequest<R: Resource> {
    List {
        params: QueryParams,
        respond_to: Response<Page<R::Summary>>,
    },
    Filter {
        respond_to: Response<FilterOptions>,
    },
    Retrieve {
        id: R::Id,
        respond_to: Response<R>,
    },
    Create {
        data: R::Create,
        respond_to: Response<R>,
    },
    Update {
        id: R::Id,
        data: R::Update,
        respond_to: Response<R>,
    },
    Destroy {
        id: R::Id,
        respond_to: Response<()>,
    },
    Clear {
        id: R::Id,
        respond_to: Response<serde_json::Value>,
    },
}

impl<R: Resource> GatewayRequest<R> {
    /// Short endpoint name, used in logs and mismatch panics.
    pub fn name(&self) -> &'static str {
        match self {
            GatewayRequest::List { .. } => "list",
            GatewayRequest::Filter { .. } => "filter",
            GatewayRequest::Retrieve { .. } => "retrieve",
            GatewayRequest::Create { .. } => "create",
            GatewayRequest::Update { .. } => "update",
            GatewayRequest::Destroy { .. } => "destroy",
            GatewayRequest::Clear { .. } => "clear",
        }
    }
}
