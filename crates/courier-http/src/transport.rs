//! The transport seam.
//!
//! The dispatcher hands a fully prepared [`TransportRequest`] to a
//! [`Transport`] and gets back the raw status, headers and body.
//! [`ReqwestTransport`] is the production implementation; tests substitute
//! an in-memory one.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::Method;
use indexmap::IndexMap;
use reqwest::Client;

use crate::config::HttpConfig;
use crate::error::{HttpError, HttpResult};

/// A boxed future returned by [`Transport::send`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A request ready to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, without the query string.
    pub url: String,
    /// Resolved query pairs, in order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: IndexMap<String, String>,
    /// Encoded body.
    pub body: Option<Bytes>,
}

impl TransportRequest {
    /// Returns the value of a query parameter.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// What came back from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers with lowercase names.
    pub headers: IndexMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

/// Carries one request/response exchange.
///
/// Implementations return `Err` only for failures below the status line.
/// Any status code, including 4xx and 5xx, is a successful exchange.
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and reads the full response body.
    fn send<'a>(&'a self, request: TransportRequest) -> BoxFuture<'a, HttpResult<TransportResponse>>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport from configuration.
    pub fn new(config: &HttpConfig) -> HttpResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| HttpError::config(format!("failed to create client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send<'a>(&'a self, request: TransportRequest) -> BoxFuture<'a, HttpResult<TransportResponse>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, &request.url);

            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;

            let status = response.status().as_u16();
            let headers = collect_headers(response.headers());
            let body = response.bytes().await?;

            Ok(TransportResponse {
                status,
                headers,
                body,
            })
        })
    }
}

/// Flattens a header map, joining repeated headers with `", "`.
fn collect_headers(headers: &http::HeaderMap) -> IndexMap<String, String> {
    let mut collected: IndexMap<String, String> = IndexMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}
