//! Scripted in-memory transport.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use courier_http::{
    BoxFuture, HttpError, HttpResult, ServiceHttpClient, Transport, TransportRequest,
    TransportResponse,
};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
enum Reply {
    Respond {
        status: u16,
        headers: IndexMap<String, String>,
        body: Bytes,
        delay: Option<Duration>,
    },
    Fail(String),
    TimeOut(String),
}

#[derive(Debug, Default)]
struct State {
    replies: VecDeque<Reply>,
    requests: Vec<TransportRequest>,
}

/// A [`Transport`] that replays scripted replies in FIFO order and records
/// every request it sees.
///
/// Clones share the same script and request log, so a test can keep one
/// handle for assertions after giving another to the client.
///
/// # Example
///
/// ```rust
/// use courier_http::ServiceCall;
/// use courier_test::MockTransport;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let mock = MockTransport::new();
/// mock.respond(200, json!({"data": {"beatmap_id": 5}}));
///
/// let response = mock
///     .client()
///     .service_call(ServiceCall::get("http://beatmaps-service/v1/beatmaps/5"))
///     .await
///     .unwrap();
///
/// assert_eq!(response.status_code(), 200);
/// assert_eq!(mock.last_request().unwrap().url, "http://beatmaps-service/v1/beatmaps/5");
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    /// Creates a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a dispatcher backed by this transport.
    pub fn client(&self) -> ServiceHttpClient {
        ServiceHttpClient::with_transport(self.clone())
    }

    /// Queues a JSON reply.
    pub fn respond(&self, status: u16, body: Value) -> &Self {
        let mut headers = IndexMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        self.push(Reply::Respond {
            status,
            headers,
            body: Bytes::from(body.to_string()),
            delay: None,
        })
    }

    /// Queues a reply wrapping `data` as `{"data": ...}`.
    pub fn respond_data(&self, status: u16, data: Value) -> &Self {
        self.respond(status, json!({ "data": data }))
    }

    /// Queues a reply with an arbitrary body.
    pub fn respond_raw(&self, status: u16, body: impl Into<Bytes>) -> &Self {
        self.push(Reply::Respond {
            status,
            headers: IndexMap::new(),
            body: body.into(),
            delay: None,
        })
    }

    /// Queues a JSON reply that is delivered after `delay`.
    pub fn respond_after(&self, delay: Duration, status: u16, body: Value) -> &Self {
        self.push(Reply::Respond {
            status,
            headers: IndexMap::new(),
            body: Bytes::from(body.to_string()),
            delay: Some(delay),
        })
    }

    /// Queues a connection failure.
    pub fn fail(&self, message: impl Into<String>) -> &Self {
        self.push(Reply::Fail(message.into()))
    }

    /// Queues a transport timeout.
    pub fn time_out(&self, message: impl Into<String>) -> &Self {
        self.push(Reply::TimeOut(message.into()))
    }

    /// Returns every request seen so far.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.state.lock().requests.clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<TransportRequest> {
        self.state.lock().requests.last().cloned()
    }

    /// Returns the number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// Returns the number of replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.state.lock().replies.len()
    }

    fn push(&self, reply: Reply) -> &Self {
        self.state.lock().replies.push_back(reply);
        self
    }
}

impl Transport for MockTransport {
    fn send<'a>(&'a self, request: TransportRequest) -> BoxFuture<'a, HttpResult<TransportResponse>> {
        let target = format!("{} {}", request.method, request.url);
        let reply = {
            let mut state = self.state.lock();
            state.requests.push(request);
            state.replies.pop_front()
        };

        Box::pin(async move {
            match reply {
                Some(Reply::Respond {
                    status,
                    headers,
                    body,
                    delay,
                }) => {
                    if let Some(delay) = delay {
                        tokio::time::sleep(delay).await;
                    }
                    Ok(TransportResponse {
                        status,
                        headers,
                        body,
                    })
                }
                Some(Reply::Fail(message)) => Err(HttpError::transport(message)),
                Some(Reply::TimeOut(message)) => Err(HttpError::timeout(message)),
                None => Err(HttpError::transport(format!("no scripted reply for {target}"))),
            }
        })
    }
}
