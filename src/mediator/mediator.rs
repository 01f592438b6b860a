//! Mediator: request name → handler registry and dispatch.
//!
//! The registry is filled once during startup (`register` needs `&mut self`)
//! and then shared read-only behind an `Arc` (`send` only needs `&self`), so
//! registration always completes before the first dispatch.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::RegistrationError;
use super::handler::Handler;
use super::request::{Command, Query, Request, RequestKind};
use crate::error::DomainError;
use crate::outcome::catch_panic_async;

/// A registered handler, type-erased so one map can hold every request type.
///
/// `handler` always holds an `Arc<dyn Handler<Request = R>>` for the request
/// type `R` whose `NAME` keys this entry.
struct Entry {
    kind: RequestKind,
    handler: Box<dyn Any + Send + Sync>,
}

/// Routes requests to the single handler registered for their name.
#[derive(Default)]
pub struct Mediator {
    handlers: HashMap<&'static str, Entry>,
}

impl Mediator {
    /// Create an empty mediator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `H::Request`.
    ///
    /// Fails if a handler is already registered under the same name; the
    /// existing handler is left in place.
    pub fn register<H: Handler>(&mut self, handler: H) -> Result<(), RegistrationError> {
        let name = <H::Request as Request>::NAME;
        let kind = <H::Request as Request>::KIND;

        if let Some(existing) = self.handlers.get(name) {
            tracing::error!(request = name, kind = %existing.kind, "duplicate handler registration");
            return Err(RegistrationError::Duplicate {
                name,
                kind: existing.kind,
            });
        }

        let handler: Arc<dyn Handler<Request = H::Request>> = Arc::new(handler);
        self.handlers.insert(
            name,
            Entry {
                kind,
                handler: Box::new(handler),
            },
        );
        tracing::debug!(request = name, %kind, "handler registered");
        Ok(())
    }

    /// Register a handler for a [`Command`].
    pub fn register_command<H>(&mut self, handler: H) -> Result<(), RegistrationError>
    where
        H: Handler,
        H::Request: Command,
    {
        self.register(handler)
    }

    /// Register a handler for a [`Query`].
    pub fn register_query<H>(&mut self, handler: H) -> Result<(), RegistrationError>
    where
        H: Handler,
        H::Request: Query,
    {
        self.register(handler)
    }

    /// Dispatch a request to its handler and return the handler's result.
    ///
    /// A request with no registered handler resolves to an internal error
    /// instead of panicking. A handler that panics resolves to one too.
    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response, DomainError> {
        let Some(entry) = self.handlers.get(R::NAME) else {
            tracing::warn!(request = R::NAME, "no handler registered");
            return Err(DomainError::internal(format!(
                "No handler registered for {}",
                R::NAME
            )));
        };

        let Some(handler) = entry.handler.downcast_ref::<Arc<dyn Handler<Request = R>>>() else {
            tracing::error!(request = R::NAME, "handler registered for a different request type");
            return Err(DomainError::internal(format!(
                "Handler registered for {} expects a different request type",
                R::NAME
            )));
        };

        tracing::debug!(request = R::NAME, kind = %entry.kind, "dispatching");
        let result = catch_panic_async(handler.execute(request), |message| {
            tracing::error!(request = R::NAME, panic = %message, "handler panicked");
            DomainError::internal(format!("Handler for {} failed unexpectedly", R::NAME))
        })
        .await
        .and_then(|result| result);
        if let Err(err) = &result {
            tracing::debug!(request = R::NAME, code = %err.code(), "handler returned failure");
        }
        result
    }

    /// Whether a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Kind of the request registered under `name`.
    pub fn kind_of(&self, name: &str) -> Option<RequestKind> {
        self.handlers.get(name).map(|entry| entry.kind)
    }

    /// Registered request names, sorted.
    pub fn request_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for Mediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator")
            .field("requests", &self.request_names())
            .finish()
    }
}
