//! Result combinators used across handlers and the boundary.
//!
//! `std::result::Result` already is the two-variant outcome type; this module
//! adds the pieces it lacks: exhaustive folding, fail-fast and collect-all
//! combination, and wrappers that turn failable or panicking code into a
//! `Result` carrying the caller's error type.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;

/// Extension methods for `Result`.
pub trait ResultExt<T, E> {
    /// Consume either branch into a common type. Both arms are required.
    fn fold<U>(self, on_success: impl FnOnce(T) -> U, on_failure: impl FnOnce(E) -> U) -> U;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn fold<U>(self, on_success: impl FnOnce(T) -> U, on_failure: impl FnOnce(E) -> U) -> U {
        match self {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        }
    }
}

/// Collect successes, stopping at the first failure.
pub fn combine<T, E>(results: impl IntoIterator<Item = Result<T, E>>) -> Result<Vec<T>, E> {
    results.into_iter().collect()
}

/// Collect successes, or every failure in order if there is at least one.
pub fn combine_all<T, E>(results: impl IntoIterator<Item = Result<T, E>>) -> Result<Vec<T>, Vec<E>> {
    let mut values = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(error) => errors.push(error),
        }
    }
    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

/// Run a failable operation, mapping its error into the caller's type.
pub fn attempt<T, X, E>(op: impl FnOnce() -> Result<T, X>, on_error: impl FnOnce(X) -> E) -> Result<T, E> {
    op().map_err(on_error)
}

/// Async counterpart of [`attempt`].
pub async fn attempt_async<T, X, E>(
    op: impl Future<Output = Result<T, X>>,
    on_error: impl FnOnce(X) -> E,
) -> Result<T, E> {
    op.await.map_err(on_error)
}

/// Run `op`, turning a panic into a failure built by `on_fault`.
///
/// `on_fault` receives the panic message when the payload is a string.
pub fn catch_panic<T, E>(op: impl FnOnce() -> T, on_fault: impl FnOnce(String) -> E) -> Result<T, E> {
    panic::catch_unwind(AssertUnwindSafe(op)).map_err(|payload| on_fault(panic_message(payload)))
}

/// Async counterpart of [`catch_panic`].
pub async fn catch_panic_async<T, E>(
    op: impl Future<Output = T>,
    on_fault: impl FnOnce(String) -> E,
) -> Result<T, E> {
    AssertUnwindSafe(op)
        .catch_unwind()
        .await
        .map_err(|payload| on_fault(panic_message(payload)))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
