//! The service-call dispatcher.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use courier_core::{codec, Convertible, ParamValue, QueryParams};
use http::Method;
use indexmap::IndexMap;

use crate::config::HttpConfig;
use crate::error::HttpResult;
use crate::response::ServiceResponse;
use crate::transport::{ReqwestTransport, Transport, TransportRequest};

const CONTENT_TYPE_JSON: &str = "application/json";

/// One outbound call to a backend service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCall {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Query parameters, resolved at dispatch.
    pub params: Option<QueryParams>,
    /// Request body, normalized at dispatch.
    pub json: Option<Convertible>,
}

impl ServiceCall {
    /// Creates a call with no parameters and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: None,
            json: None,
        }
    }

    /// Creates a `GET` call.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a `POST` call.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Creates a `PUT` call.
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Creates a `PATCH` call.
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    /// Creates a `DELETE` call.
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.get_or_insert_with(QueryParams::new).insert(key, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn json(mut self, body: impl Into<Convertible>) -> Self {
        self.json = Some(body.into());
        self
    }

    /// Resolves parameters and encodes the body.
    pub fn into_transport_request(self) -> HttpResult<TransportRequest> {
        let query = self.params.as_ref().map(build_query).unwrap_or_default();

        let mut headers = IndexMap::new();
        let body = match &self.json {
            Some(body) => {
                headers.insert("content-type".to_string(), CONTENT_TYPE_JSON.to_string());
                Some(Bytes::from(codec::encode(body)?))
            }
            None => None,
        };

        Ok(TransportRequest {
            method: self.method,
            url: self.url,
            query,
            headers,
            body,
        })
    }
}

/// Resolves query parameters into wire pairs.
///
/// Absent values are dropped, enumerated values become their primitive and
/// insertion order is kept.
pub fn build_query(params: &QueryParams) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| value.resolve().map(|primitive| (key.to_string(), primitive.to_string())))
        .collect()
}

/// Dispatches [`ServiceCall`]s over a shared [`Transport`].
///
/// Cloning is cheap; clones share the transport and its connection pool.
#[derive(Clone)]
pub struct ServiceHttpClient {
    transport: Arc<dyn Transport>,
}

impl ServiceHttpClient {
    /// Creates a client backed by `reqwest`.
    pub fn new(config: &HttpConfig) -> HttpResult<Self> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(transport: impl Transport) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Creates a client over a shared transport.
    pub fn from_arc(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Performs one exchange and returns the raw envelope.
    ///
    /// Any status code yields `Ok`. Only encoding and transport failures
    /// return `Err`.
    pub async fn service_call(&self, call: ServiceCall) -> HttpResult<ServiceResponse> {
        let request = call.into_transport_request()?;
        let response = self.transport.send(request).await?;
        Ok(ServiceResponse::from(response))
    }
}

impl fmt::Debug for ServiceHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHttpClient").finish_non_exhaustive()
    }
}
