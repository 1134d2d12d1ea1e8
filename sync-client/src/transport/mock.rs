//! Mock transport for testing.
//!
//! Allows queueing responses, capturing sent requests for verification, and
//! parking a request in flight until the test releases it.

use super::{Request, Response, Transport, TransportError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// Mock transport for testing.
///
/// Responses are handed out first-in first-out, in the order requests are
/// *sent*, regardless of the order in which held requests complete.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    sent_requests: Vec<Request>,
    response_queue: VecDeque<Response>,
    fail_next: Option<TransportError>,
    hold_next: Option<oneshot::Receiver<()>>,
}

/// Handle that lets a held request complete.
///
/// Dropping the handle releases the request as well.
#[derive(Debug)]
pub struct Release {
    tx: oneshot::Sender<()>,
}

impl Release {
    /// Let the held request return its response.
    pub fn release(self) {
        let _ = self.tx.send(());
    }
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, MockTransportInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a raw response for the next `send()` call.
    pub fn queue_response(&self, status: u16, body: impl Into<String>) {
        self.inner().response_queue.push_back(Response {
            status,
            body: body.into(),
        });
    }

    /// Queue a JSON response.
    pub fn queue_json(&self, status: u16, body: Value) {
        self.queue_response(status, body.to_string());
    }

    /// Queue a `200` JSON response.
    pub fn queue_ok(&self, body: Value) {
        self.queue_json(200, body);
    }

    /// Queue an `{ "error": { status, code, message } }` response.
    pub fn queue_error(&self, status: u16, code: &str, message: &str) {
        self.queue_json(
            status,
            json!({ "error": { "status": status, "code": code, "message": message } }),
        );
    }

    /// Get all requests that were sent.
    pub fn sent_requests(&self) -> Vec<Request> {
        self.inner().sent_requests.clone()
    }

    /// Get the last request that was sent.
    pub fn last_sent(&self) -> Option<Request> {
        self.inner().sent_requests.last().cloned()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.inner().sent_requests.len()
    }

    /// Number of queued responses not yet consumed.
    pub fn pending_responses(&self) -> usize {
        self.inner().response_queue.len()
    }

    /// Cause the next `send()` to fail with the given error.
    pub fn fail_next(&self, error: TransportError) {
        self.inner().fail_next = Some(error);
    }

    /// Park the next `send()` after it has taken its response, until the
    /// returned handle is released.
    pub fn hold_next(&self) -> Release {
        let (tx, rx) = oneshot::channel();
        self.inner().hold_next = Some(rx);
        Release { tx }
    }

    /// Clear all state (requests, queue, forced failures).
    pub fn reset(&self) {
        *self.inner() = MockTransportInner::default();
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let (outcome, hold) = {
            let mut inner = self.inner();
            inner.sent_requests.push(request);

            // Check for forced failure
            let outcome = match inner.fail_next.take() {
                Some(error) => Err(error),
                None => inner
                    .response_queue
                    .pop_front()
                    .ok_or_else(|| TransportError::ConnectionFailed("no response queued".into())),
            };
            (outcome, inner.hold_next.take())
        };

        if let Some(rx) = hold {
            let _ = rx.await;
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Method;

    // ===========================================
    // MockTransport Basic Tests
    // ===========================================

    #[tokio::test]
    async fn mock_transport_records_requests() {
        let transport = MockTransport::new();
        transport.queue_ok(json!({}));
        transport.queue_ok(json!({}));

        transport.send(Request::get("http://h/a")).await.unwrap();
        transport
            .send(Request::post("http://h/b", json!({ "x": 1 })))
            .await
            .unwrap();

        let sent = transport.sent_requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].url, "http://h/a");
        assert_eq!(sent[1].method, Method::Post);
        assert_eq!(transport.last_sent().unwrap().url, "http://h/b");
    }

    #[tokio::test]
    async fn mock_transport_returns_queued_responses_in_order() {
        let transport = MockTransport::new();
        transport.queue_response(200, "first");
        transport.queue_error(500, "X", "boom");

        let r1 = transport.send(Request::get("http://h/1")).await.unwrap();
        let r2 = transport.send(Request::get("http://h/2")).await.unwrap();

        assert_eq!(r1.body, "first");
        assert_eq!(r2.status, 500);
        assert!(r2.body.contains("boom"));
        assert_eq!(transport.pending_responses(), 0);
    }

    #[tokio::test]
    async fn empty_queue_is_connection_failure() {
        let transport = MockTransport::new();

        let result = transport.send(Request::get("http://h")).await;
        assert!(matches!(result, Err(TransportError::ConnectionFailed(_))));
        assert_eq!(transport.request_count(), 1);
    }

    // ===========================================
    // Error Condition Tests
    // ===========================================

    #[tokio::test]
    async fn forced_failure_applies_once() {
        let transport = MockTransport::new();
        transport.queue_ok(json!({ "ok": true }));
        transport.fail_next(TransportError::Timeout);

        let result = transport.send(Request::get("http://h")).await;
        assert_eq!(result, Err(TransportError::Timeout));

        // Next send should work (and get the queued data)
        let response = transport.send(Request::get("http://h")).await.unwrap();
        assert_eq!(response.status, 200);
    }

    // ===========================================
    // Hold / Release Tests
    // ===========================================

    #[tokio::test]
    async fn held_request_waits_for_release() {
        let transport = MockTransport::new();
        transport.queue_response(200, "held");
        transport.queue_response(200, "free");
        let release = transport.hold_next();

        let (held, free) = tokio::join!(transport.send(Request::get("http://h/held")), async {
            let free = transport.send(Request::get("http://h/free")).await;
            release.release();
            free
        });

        assert_eq!(held.unwrap().body, "held");
        assert_eq!(free.unwrap().body, "free");
    }

    #[tokio::test]
    async fn dropped_release_unblocks() {
        let transport = MockTransport::new();
        transport.queue_response(200, "x");
        drop(transport.hold_next());

        let response = transport.send(Request::get("http://h")).await.unwrap();
        assert_eq!(response.body, "x");
    }

    // ===========================================
    // Clone and Shared State Tests
    // ===========================================

    #[tokio::test]
    async fn mock_transport_clone_shares_state() {
        let transport1 = MockTransport::new();
        let transport2 = transport1.clone();

        transport1.queue_ok(json!({}));
        transport2.send(Request::get("http://h")).await.unwrap();

        assert_eq!(transport1.request_count(), 1);
    }

    #[tokio::test]
    async fn mock_transport_reset_clears_all() {
        let transport = MockTransport::new();
        transport.queue_ok(json!({}));
        transport.send(Request::get("http://h")).await.unwrap();
        transport.queue_ok(json!({}));
        transport.fail_next(TransportError::Timeout);

        transport.reset();

        assert!(transport.sent_requests().is_empty());
        assert_eq!(transport.pending_responses(), 0);
        assert!(transport.last_sent().is_none());
    }
}
