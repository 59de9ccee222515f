//! The response envelope.

use std::sync::OnceLock;

use bytes::Bytes;
use courier_core::{codec, CodecError, CodecResult};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::transport::TransportResponse;

/// Raw outcome of one service call.
///
/// The body is decoded on first access to [`json`](Self::json) and the
/// outcome, success or failure, is memoized for the lifetime of the
/// envelope. Nothing about the status code is interpreted here.
#[derive(Debug)]
pub struct ServiceResponse {
    status_code: u16,
    headers: IndexMap<String, String>,
    content: Bytes,
    decoded: OnceLock<CodecResult<Value>>,
}

impl ServiceResponse {
    /// Creates an envelope from its raw parts.
    pub fn new(status_code: u16, headers: IndexMap<String, String>, content: impl Into<Bytes>) -> Self {
        Self {
            status_code,
            headers,
            content: content.into(),
            decoded: OnceLock::new(),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns true if the status is in `200..300`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns the response headers.
    #[must_use]
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// Gets a header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    /// Returns the decoded JSON body.
    ///
    /// Decoding happens once; later calls return the memoized outcome.
    pub fn json(&self) -> CodecResult<&Value> {
        self.decoded
            .get_or_init(|| codec::decode(&self.content))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Decodes the top-level `data` field into `T`.
    pub fn data<T: DeserializeOwned>(&self) -> CodecResult<T> {
        let data = self
            .json()?
            .get("data")
            .ok_or_else(|| CodecError::missing_field("data"))?;
        T::deserialize(data).map_err(CodecError::decode)
    }
}

impl From<TransportResponse> for ServiceResponse {
    fn from(response: TransportResponse) -> Self {
        Self::new(response.status, response.headers, response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: &'static str) -> ServiceResponse {
        let mut headers = IndexMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        ServiceResponse::new(status, headers, Bytes::from_static(body.as_bytes()))
    }

    #[test]
    fn test_is_success_range() {
        assert!(response(200, "{}").is_success());
        assert!(response(204, "").is_success());
        assert!(response(299, "{}").is_success());
        assert!(!response(199, "{}").is_success());
        assert!(!response(300, "{}").is_success());
        assert!(!response(404, "{}").is_success());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = response(200, "{}");
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("x-request-id"), None);
    }

    #[test]
    fn test_json_is_memoized() {
        let response = response(200, r#"{"data": {"beatmap_id": 5}}"#);

        let first = response.json().unwrap();
        let second = response.json().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, &json!({"data": {"beatmap_id": 5}}));
    }

    #[test]
    fn test_decode_failure_is_lazy_and_repeatable() {
        // Constructing the envelope never fails.
        let response = response(502, "<html>Bad Gateway</html>");
        assert_eq!(response.status_code(), 502);

        let first = response.json().unwrap_err();
        let second = response.json().unwrap_err();
        assert!(matches!(first, CodecError::Decode(_)));
        assert_eq!(first, second);
        assert_eq!(response.text(), "<html>Bad Gateway</html>");
    }

    #[test]
    fn test_data_decodes_typed_record() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Record {
            beatmap_id: i64,
        }

        let response = response(200, r#"{"data": {"beatmap_id": 5, "extra": true}}"#);
        assert_eq!(response.data::<Record>().unwrap(), Record { beatmap_id: 5 });

        let response = response_missing_data();
        assert_eq!(
            response.data::<Record>().unwrap_err(),
            CodecError::missing_field("data")
        );
    }

    fn response_missing_data() -> ServiceResponse {
        response(200, r#"{"items": []}"#)
    }

    #[test]
    fn test_from_transport_response() {
        let transport = TransportResponse {
            status: 201,
            headers: IndexMap::new(),
            body: Bytes::from_static(b"{\"data\": []}"),
        };

        let response = ServiceResponse::from(transport);
        assert_eq!(response.status_code(), 201);
        assert_eq!(response.data::<Vec<i64>>().unwrap(), Vec::<i64>::new());
    }
}
