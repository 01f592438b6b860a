//! Vertical slice service template.
//!
//! Features are self-contained slices ([`FeatureModule`]) that register
//! request handlers on a [`Mediator`] and describe their HTTP routes. A
//! [`Startup`] assembles them: `initialize` builds the mediator,
//! `register_routes` mounts every slice on an axum router.
//!
//! Every operation returns `Result<_, DomainError>`; the HTTP boundary maps
//! each [`ErrorCode`] to a fixed status and renders an [`ErrorBody`].

mod config;
mod error;
mod mediator;
mod module;
mod outcome;
mod startup;

pub mod features;
pub mod http;
pub mod telemetry;

pub use config::Config;
pub use error::{Cause, DomainError, ErrorBody, ErrorCode, FieldErrors};
pub use mediator::{
    Command, CommandHandler, Handler, Mediator, Query, QueryHandler, RegistrationError, Request,
    RequestKind,
};
pub use module::{FeatureModule, RouteBinding, RouteGroup};
pub use outcome::{attempt, attempt_async, catch_panic, catch_panic_async, combine, combine_all, ResultExt};
pub use startup::{Startup, StartupError};
