//! # Mock Gateway & Testing Guide
//!
//! Test doubles for [`ResourceGateway`](crate::framework::ResourceGateway). They let state
//! container tests run without a backend, deterministically, with easy error injection.
//!
//! | Tool | Use it when |
//! |------|-------------|
//! | [`MockGateway`] | Answers are known up front: queue them with `expect_*().return_ok(..)` |
//! | [`create_mock_gateway`] + [`expect_list`] & co. | The test must control *when* an answer arrives (overlapping loads) |
//!
//! ## Fluent expectations
//!
//! ```rust,ignore
//! let mock = MockGateway::<Movie>::new();
//! mock.expect_list().return_ok(page);
//! mock.expect_filter().return_err(GatewayError::Closed);
//!
//! let state = ResourceState::<Movie>::new();
//! state.set_resource(mock.gateway());
//! state.load_items(QueryParams::new()).await?;
//!
//! mock.verify(); // all queued answers consumed
//! ```
//!
//! Expectations are consumed in order. A call that does not match the next expectation
//! makes the mock drop the request, so the caller sees [`GatewayError::Dropped`], and
//! [`MockGateway::verify`] panics afterwards.
//!
//! ## Manual answering
//!
//! ```rust,ignore
//! let (gateway, mut receiver) = create_mock_gateway::<Movie>(10);
//! let task = tokio::spawn(async move { state.load_items(params).await });
//! let (params, responder) = expect_list(&mut receiver).await.expect("list request");
//! responder.send(Ok(page)).unwrap();
//! ```

use crate::framework::channel::ChannelGateway;
use crate::framework::error::GatewayError;
use crate::framework::gateway::ResourceGateway;
use crate::framework::message::{GatewayRequest, Response};
use crate::framework::resource::Resource;
use crate::model::{FilterOptions, Page, QueryParams};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::warn;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A queued answer for the next call of the matching endpoint.
enum Expectation<R: Resource> {
    List(Result<Page<R::Summary>, GatewayError>),
    Filter(Result<FilterOptions, GatewayError>),
    Retrieve(Result<R, GatewayError>),
    Create(Result<R, GatewayError>),
    Update(Result<R, GatewayError>),
    Destroy(Result<(), GatewayError>),
    Clear(Result<serde_json::Value, GatewayError>),
}

/// A call observed by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    List(QueryParams),
    Filter,
    Retrieve(String),
    Create,
    Update(String),
    Destroy(String),
    Clear(String),
}

struct Ledger<R: Resource> {
    expectations: VecDeque<Expectation<R>>,
    calls: Vec<MockCall>,
    mismatches: Vec<&'static str>,
}

type SharedLedger<R> = Arc<Mutex<Ledger<R>>>;

/// A gateway answering from a queue of expectations.
pub struct MockGateway<R: Resource> {
    gateway: ChannelGateway<R>,
    ledger: SharedLedger<R>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<R: Resource> Default for MockGateway<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> MockGateway<R> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<GatewayRequest<R>>(100);
        let ledger: SharedLedger<R> = Arc::new(Mutex::new(Ledger {
            expectations: VecDeque::new(),
            calls: Vec::new(),
            mismatches: Vec::new(),
        }));
        let task_ledger = ledger.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut ledger = task_ledger.lock().unwrap();
                ledger.calls.push(record(&request));
                let expectation = ledger.expectations.pop_front();

                match (request, expectation) {
                    (GatewayRequest::List { respond_to, .. }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (GatewayRequest::Filter { respond_to }, Some(Expectation::Filter(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (GatewayRequest::Retrieve { respond_to, .. }, Some(Expectation::Retrieve(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (GatewayRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (GatewayRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (GatewayRequest::Destroy { respond_to, .. }, Some(Expectation::Destroy(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (GatewayRequest::Clear { respond_to, .. }, Some(Expectation::Clear(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, _) => {
                        // Dropping the request drops its responder: the caller gets `Dropped`.
                        warn!(call = request.name(), "Unexpected gateway call");
                        ledger.mismatches.push(request.name());
                    }
                }
            }
        });

        Self {
            gateway: ChannelGateway::new(sender),
            ledger,
            _handle: handle,
        }
    }

    /// The gateway to bind into the container under test.
    pub fn gateway(&self) -> Arc<dyn ResourceGateway<R>> {
        Arc::new(self.gateway.clone())
    }

    pub fn expect_list(&self) -> ExpectationBuilder<R, Page<R::Summary>> {
        self.builder(Expectation::List)
    }

    pub fn expect_filter(&self) -> ExpectationBuilder<R, FilterOptions> {
        self.builder(Expectation::Filter)
    }

    pub fn expect_retrieve(&self) -> ExpectationBuilder<R, R> {
        self.builder(Expectation::Retrieve)
    }

    pub fn expect_create(&self) -> ExpectationBuilder<R, R> {
        self.builder(Expectation::Create)
    }

    pub fn expect_update(&self) -> ExpectationBuilder<R, R> {
        self.builder(Expectation::Update)
    }

    pub fn expect_destroy(&self) -> ExpectationBuilder<R, ()> {
        self.builder(Expectation::Destroy)
    }

    pub fn expect_clear(&self) -> ExpectationBuilder<R, serde_json::Value> {
        self.builder(Expectation::Clear)
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.ledger.lock().unwrap().calls.clone()
    }

    /// Panics unless every expectation was consumed by a matching call.
    pub fn verify(&self) {
        let ledger = self.ledger.lock().unwrap();
        if !ledger.mismatches.is_empty() {
            panic!("Unexpected gateway calls: {:?}", ledger.mismatches);
        }
        if !ledger.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                ledger.expectations.len()
            );
        }
    }

    fn builder<T>(
        &self,
        wrap: fn(Result<T, GatewayError>) -> Expectation<R>,
    ) -> ExpectationBuilder<R, T> {
        ExpectationBuilder {
            ledger: self.ledger.clone(),
            wrap,
        }
    }
}

fn record<R: Resource>(request: &GatewayRequest<R>) -> MockCall {
    match request {
        GatewayRequest::List { params, .. } => MockCall::List(params.clone()),
        GatewayRequest::Filter { .. } => MockCall::Filter,
        GatewayRequest::Retrieve { id, .. } => MockCall::Retrieve(id.to_string()),
        GatewayRequest::Create { .. } => MockCall::Create,
        GatewayRequest::Update { id, .. } => MockCall::Update(id.to_string()),
        GatewayRequest::Destroy { id, .. } => MockCall::Destroy(id.to_string()),
        GatewayRequest::Clear { id, .. } => MockCall::Clear(id.to_string()),
    }
}

/// Queues the answer for one expected call.
pub struct ExpectationBuilder<R: Resource, T> {
    ledger: SharedLedger<R>,
    wrap: fn(Result<T, GatewayError>) -> Expectation<R>,
}

impl<R: Resource, T> ExpectationBuilder<R, T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: GatewayError) {
        self.push(Err(error));
    }

    fn push(self, result: Result<T, GatewayError>) {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.expectations.push_back((self.wrap)(result));
    }
}

// =============================================================================
// MANUAL ANSWERING HELPERS
// =============================================================================

/// Creates a gateway and the receiver its calls arrive on.
///
/// Nothing answers automatically: the test pulls each request with one of the `expect_*`
/// helpers below and replies through the returned responder whenever it wants.
pub fn create_mock_gateway<R: Resource>(
    buffer_size: usize,
) -> (Arc<dyn ResourceGateway<R>>, mpsc::Receiver<GatewayRequest<R>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(ChannelGateway::new(sender)), receiver)
}

/// Waits for the next request and returns it if it is a `list` call.
pub async fn expect_list<R: Resource>(
    receiver: &mut mpsc::Receiver<GatewayRequest<R>>,
) -> Option<(QueryParams, Response<Page<R::Summary>>)> {
    match receiver.recv().await {
        Some(GatewayRequest::List { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `filter` call.
pub async fn expect_filter<R: Resource>(
    receiver: &mut mpsc::Receiver<GatewayRequest<R>>,
) -> Option<Response<FilterOptions>> {
    match receiver.recv().await {
        Some(GatewayRequest::Filter { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `retrieve` call.
pub async fn expect_retrieve<R: Resource>(
    receiver: &mut mpsc::Receiver<GatewayRequest<R>>,
) -> Option<(R::Id, Response<R>)> {
    match receiver.recv().await {
        Some(GatewayRequest::Retrieve { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Genre, GenreCreate};

    fn genre(id: u64, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_gateway_answers_in_order() {
        let mock = MockGateway::<Genre>::new();
        mock.expect_create().return_ok(genre(7, "Drama"));
        mock.expect_retrieve().return_ok(genre(7, "Drama"));

        let gateway = mock.gateway();
        let created = gateway
            .create(&GenreCreate {
                name: "Drama".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 7);

        let fetched = gateway.retrieve(&7).await.unwrap();
        assert_eq!(fetched.name, "Drama");

        assert_eq!(
            mock.calls(),
            vec![MockCall::Create, MockCall::Retrieve("7".to_string())]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_gateway_unexpected_call_is_dropped() {
        let mock = MockGateway::<Genre>::new();
        mock.expect_filter().return_ok(FilterOptions::default());

        let result = mock.gateway().destroy(&1).await;
        assert!(matches!(result, Err(GatewayError::Dropped)));
    }

    #[tokio::test]
    async fn test_manual_answering() {
        let (gateway, mut receiver) = create_mock_gateway::<Genre>(10);

        let task = tokio::spawn(async move { gateway.retrieve(&3).await });

        let (id, responder) = expect_retrieve(&mut receiver)
            .await
            .expect("Expected Retrieve request");
        assert_eq!(id, 3);
        responder.send(Ok(genre(3, "Comedy"))).unwrap();

        let result = task.await.unwrap();
        assert_eq!(result.unwrap().name, "Comedy");
    }
}
