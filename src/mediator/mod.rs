//! Mediator: in-process request → handler registry and dispatch.
//!
//! Every operation is modelled as a typed [`Request`], either a [`Command`]
//! (mutates state) or a [`Query`] (reads). Each request type declares a stable
//! `NAME`; exactly one [`Handler`] may be registered for that name.
//!
//! ## Quick Start
//!
//! ```ignore
//! use vertical_slice::{DomainError, Handler, Mediator, Query, Request, RequestKind};
//!
//! struct Ping;
//!
//! impl Request for Ping {
//!     const NAME: &'static str = "system.ping";
//!     const KIND: RequestKind = RequestKind::Query;
//!     type Response = &'static str;
//! }
//! impl Query for Ping {}
//!
//! struct PingHandler;
//!
//! #[async_trait]
//! impl Handler for PingHandler {
//!     type Request = Ping;
//!
//!     async fn execute(&self, _request: Ping) -> Result<&'static str, DomainError> {
//!         Ok("pong")
//!     }
//! }
//!
//! let mut mediator = Mediator::new();
//! mediator.register_query(PingHandler)?;
//!
//! let mediator = Arc::new(mediator);
//! assert_eq!(mediator.send(Ping).await?, "pong");
//! ```
//!
//! ## Handler Convention
//!
//! Expected failures (bad input, missing or duplicate resources) are returned
//! as `Err(DomainError)`. Panicking is reserved for genuine bugs.

mod error;
mod handler;
mod mediator;
mod request;

pub use error::RegistrationError;
pub use handler::{CommandHandler, Handler, QueryHandler};
pub use mediator::Mediator;
pub use request::{Command, Query, Request, RequestKind};
