//! Shared plumbing for resource clients.

use std::fmt::Display;

use courier_http::{ServiceCall, ServiceHttpClient, ServiceResponse};
use courier_telemetry::Logger;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiResult;
use crate::urls::normalize_base;

/// One backend service as seen by a resource client.
#[derive(Debug, Clone)]
pub(crate) struct Resource {
    http: ServiceHttpClient,
    base_url: String,
    logger: Logger,
}

impl Resource {
    pub(crate) fn new(http: ServiceHttpClient, base_url: &str, logger: Logger) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
            logger,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL. `path` starts with `/`.
    pub(crate) fn url(&self, path: impl Display) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Performs the call and decodes `data` on success.
    ///
    /// A non-2xx reply is logged once under `failure` and yields `None`.
    pub(crate) async fn fetch<T>(&self, call: ServiceCall, failure: &str) -> ApiResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.http.service_call(call).await?;
        if !response.is_success() {
            self.log_failure(failure, &response);
            return Ok(None);
        }
        Ok(Some(response.data()?))
    }

    /// Performs the call and reports whether it succeeded.
    pub(crate) async fn succeeded(&self, call: ServiceCall, failure: &str) -> ApiResult<bool> {
        let response = self.http.service_call(call).await?;
        if !response.is_success() {
            self.log_failure(failure, &response);
            return Ok(false);
        }
        Ok(true)
    }

    fn log_failure(&self, failure: &str, response: &ServiceResponse) {
        let body = match response.json() {
            Ok(value) => value.clone(),
            Err(_) => Value::String(response.text()),
        };
        self.logger.error(
            failure,
            &[("status", Value::from(response.status_code())), ("response", body)],
        );
    }
}
