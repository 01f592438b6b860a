//! Configuration faults raised while wiring handlers.

use super::request::RequestKind;

/// Error raised while registering handlers on a [`Mediator`](super::Mediator).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// A handler is already registered under this request name.
    #[error("a handler is already registered for {kind} {name}")]
    Duplicate { name: &'static str, kind: RequestKind },
}
