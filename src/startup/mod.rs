//! Startup: the ordered module list and the mediator built from it.
//!
//! `Startup` is an explicit application context: construct it at process
//! entry, `initialize` it once, then hand the resulting mediator and router
//! to whatever needs them. Tests create their own instance or `reset` one.
//!
//! ## Example
//!
//! ```ignore
//! let mut startup = Startup::new().module(UsersModule::in_memory(notifier));
//! let mediator = startup.initialize()?;
//! let app = startup.register_routes(http::base_router())?;
//! ```

mod error;
mod startup;

pub use error::StartupError;
pub use startup::Startup;
