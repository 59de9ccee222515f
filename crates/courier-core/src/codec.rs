//! Strict JSON codec.
//!
//! [`encode`] accepts any `Serialize` value. A [`Convertible`](crate::Convertible)
//! serializes through the normalizer, so domain values embedded in a body
//! are converted during serialization. [`decode`] never returns a partial
//! value: malformed input is an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{CodecError, CodecResult};

/// Encodes a value as compact JSON bytes.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> CodecResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(CodecError::encode)
}

/// Decodes bytes into a generic JSON value.
pub fn decode(bytes: &[u8]) -> CodecResult<Value> {
    serde_json::from_slice(bytes).map_err(CodecError::decode)
}

/// Decodes bytes straight into `T`.
pub fn decode_as<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    serde_json::from_slice(bytes).map_err(CodecError::decode)
}
