//! Feature modules: self-contained slices that wire themselves in.
//!
//! A feature implements [`FeatureModule`] twice over: once to build its
//! capabilities and register handlers on a [`Mediator`], once to describe the
//! HTTP routes it owns as a [`RouteGroup`]. Keeping the two apart lets tests
//! assemble a mediator without any transport at all.
//!
//! ## Module Convention
//!
//! ```ignore
//! pub struct OrdersModule { /* settings */ }
//!
//! impl FeatureModule for OrdersModule {
//!     fn name(&self) -> &'static str { "orders" }
//!
//!     fn register_handlers(&self, mediator: &mut Mediator) -> Result<(), RegistrationError> {
//!         let repo = Arc::new(InMemoryOrderRepository::new());
//!         mediator.register_command(PlaceOrderHandler::new(repo))
//!     }
//!
//!     fn register_routes(&self, mediator: Arc<Mediator>) -> RouteGroup {
//!         let controller = Arc::new(OrdersController::new(mediator));
//!         RouteGroup::new("/orders")
//!             .bind(Method::POST, "/", post(place_order).with_state(controller))
//!     }
//! }
//! ```

mod route_group;

use std::sync::Arc;

use crate::mediator::{Mediator, RegistrationError};

pub use route_group::{RouteBinding, RouteGroup};

/// A self-contained feature.
pub trait FeatureModule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Build this feature's capabilities and register its handlers.
    ///
    /// Must succeed on any fresh mediator, and fail with
    /// [`RegistrationError::Duplicate`] when repeated on the same one.
    fn register_handlers(&self, mediator: &mut Mediator) -> Result<(), RegistrationError>;

    /// Describe the routes this feature owns. Must not register handlers.
    fn register_routes(&self, mediator: Arc<Mediator>) -> RouteGroup;
}
