//! Request-scoped correlation ids.
//!
//! The current request id lives in a tokio task-local. A binding is made
//! with [`scope`] and is visible to everything the scoped future awaits,
//! across suspension points, but never to sibling tasks. Spawned tasks
//! start without a binding; wrap their future in [`propagate`] to carry
//! the current one along.
//!
//! # Example
//!
//! ```rust
//! use courier_telemetry::context;
//!
//! # tokio_test::block_on(async {
//! context::scope(None, async {
//!     context::set_request_id("req-42").unwrap();
//!     assert_eq!(context::request_id().as_deref(), Some("req-42"));
//! })
//! .await;
//!
//! assert_eq!(context::request_id(), None);
//! # });
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TelemetryError, TelemetryResult};

tokio::task_local! {
    static REQUEST_ID: RefCell<Option<Arc<str>>>;
}

/// Runs `fut` inside a fresh request scope.
///
/// The scope starts bound to `request_id`, or unbound if `None`.
pub async fn scope<F>(request_id: Option<String>, fut: F) -> F::Output
where
    F: Future,
{
    REQUEST_ID
        .scope(RefCell::new(request_id.map(Arc::from)), fut)
        .await
}

/// Runs `f` inside a fresh request scope on the current thread.
pub fn scope_sync<R>(request_id: Option<String>, f: impl FnOnce() -> R) -> R {
    REQUEST_ID.sync_scope(RefCell::new(request_id.map(Arc::from)), f)
}

/// Binds the request id for the rest of the current scope.
///
/// # Errors
///
/// Returns [`TelemetryError::NoRequestScope`] when called outside of
/// [`scope`].
pub fn set_request_id(request_id: impl Into<String>) -> TelemetryResult<()> {
    let request_id: Arc<str> = Arc::from(request_id.into());
    REQUEST_ID
        .try_with(|slot| *slot.borrow_mut() = Some(request_id))
        .map_err(|_| TelemetryError::NoRequestScope)
}

/// Removes the binding for the rest of the current scope.
///
/// # Errors
///
/// Returns [`TelemetryError::NoRequestScope`] when called outside of
/// [`scope`].
pub fn clear_request_id() -> TelemetryResult<()> {
    REQUEST_ID
        .try_with(|slot| *slot.borrow_mut() = None)
        .map_err(|_| TelemetryError::NoRequestScope)
}

/// Returns the request id visible to the current task, if any.
pub fn request_id() -> Option<String> {
    REQUEST_ID
        .try_with(|slot| slot.borrow().as_deref().map(str::to_owned))
        .ok()
        .flatten()
}

/// Wraps `fut` so it runs with a copy of the current binding.
///
/// Use this before handing a future to `tokio::spawn`. Changes made inside
/// the wrapped future do not flow back.
pub fn propagate<F>(fut: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    let current = REQUEST_ID
        .try_with(|slot| slot.borrow().clone())
        .ok()
        .flatten();
    REQUEST_ID.scope(RefCell::new(current), fut)
}

/// A freshly generated correlation id.
///
/// Uses UUID v7 so ids sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new time-ordered id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<RequestId> for String {
    fn from(id: RequestId) -> Self {
        id.to_string()
    }
}
