//! # Courier Core
//!
//! Foundational types shared by every Courier crate:
//!
//! - [`Convertible`] - The closed set of values accepted for transmission
//! - [`normalize`] - Conversion of a [`Convertible`] into JSON-safe form
//! - [`codec`] - Strict JSON encode/decode
//! - [`ParamValue`] / [`QueryParams`] - Query parameters as handed to the dispatcher
//! - [`timestamp`] - Lenient decoding of service timestamps
//! - [`models`] - Records exchanged with the beatmaps, chat, scores and users services

#![doc(html_root_url = "https://docs.rs/courier-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod codec;
mod error;
pub mod models;
mod normalize;
mod params;
pub mod timestamp;

pub use error::{CodecError, CodecResult};
pub use normalize::{normalize, Convertible, Model, ModelFields};
pub use params::{EnumValue, ParamValue, Primitive, QueryParams};

// Re-exported so the `mapping!` macro works in downstream crates.
#[doc(hidden)]
pub use indexmap;
