//! # Courier HTTP
//!
//! The service-call dispatcher used by every resource client.
//!
//! A [`ServiceCall`] names a method, an absolute URL, optional query
//! parameters and an optional body. [`ServiceHttpClient::service_call`]
//! resolves the parameters, normalizes and encodes the body, performs the
//! exchange and hands back a [`ServiceResponse`] whatever the status code.
//!
//! ```text
//! ServiceCall ──► build_query / codec::encode ──► Transport ──► ServiceResponse
//!                                                  (reqwest)      (lazy json)
//! ```
//!
//! The dispatcher never logs and never retries. Interpreting the status is
//! up to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use courier_core::models::Status;
//! use courier_http::{HttpConfig, ServiceCall, ServiceHttpClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ServiceHttpClient::new(&HttpConfig::from_env()?)?;
//! let response = client
//!     .service_call(ServiceCall::get("http://chat-service/v1/chats").param("status", Status::Active))
//!     .await?;
//!
//! if response.is_success() {
//!     println!("{}", response.json()?);
//! }
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/courier-http/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
pub mod config;
mod error;
mod response;
pub mod transport;

pub use client::{build_query, ServiceCall, ServiceHttpClient};
pub use config::HttpConfig;
pub use error::{HttpError, HttpResult};
pub use http::Method;
pub use response::ServiceResponse;
pub use transport::{BoxFuture, ReqwestTransport, Transport, TransportRequest, TransportResponse};
