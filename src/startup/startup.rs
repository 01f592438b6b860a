use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::Router;

use super::error::StartupError;
use crate::mediator::Mediator;
use crate::module::FeatureModule;

/// Ordered feature modules plus the mediator built from them.
#[derive(Default)]
pub struct Startup {
    modules: Vec<Arc<dyn FeatureModule>>,
    mediator: Option<Arc<Mediator>>,
}

impl Startup {
    /// Create a startup with no modules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a feature module. Order is registration and mount order.
    ///
    /// Uses builder pattern; returns `self` for chaining.
    pub fn module<M: FeatureModule + 'static>(mut self, module: M) -> Self {
        self.modules.push(Arc::new(module));
        self
    }

    /// Names of the registered modules, in order.
    pub fn module_names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Build the mediator, or return the one already built.
    ///
    /// Every module's `register_handlers` runs in order against a fresh
    /// mediator. Nothing is cached if any module fails.
    pub fn initialize(&mut self) -> Result<Arc<Mediator>, StartupError> {
        if let Some(mediator) = &self.mediator {
            return Ok(Arc::clone(mediator));
        }

        let mut mediator = Mediator::new();
        for module in &self.modules {
            module
                .register_handlers(&mut mediator)
                .map_err(|source| StartupError::Registration {
                    module: module.name(),
                    source,
                })?;
            tracing::debug!(module = module.name(), "handlers registered");
        }

        tracing::info!(
            modules = ?self.module_names(),
            requests = ?mediator.request_names(),
            "mediator initialized"
        );
        let mediator = Arc::new(mediator);
        self.mediator = Some(Arc::clone(&mediator));
        Ok(mediator)
    }

    /// Mount every module's route group onto `app`, in module order.
    ///
    /// Fails if `initialize` has not run, if two modules claim the same
    /// base path, or if a group binds the same method and path twice.
    pub fn register_routes(&self, app: Router) -> Result<Router, StartupError> {
        let mediator = self.mediator.as_ref().ok_or(StartupError::NotInitialized)?;

        let mut claimed: HashMap<String, &'static str> = HashMap::new();
        let mut app = app;
        for module in &self.modules {
            let group = module.register_routes(Arc::clone(mediator));
            let base_path = group.base_path().to_string();

            if !is_mountable(&base_path) {
                return Err(StartupError::InvalidBasePath {
                    module: module.name(),
                    path: base_path,
                });
            }
            if let Some(first) = claimed.get(&base_path) {
                return Err(StartupError::BasePathCollision {
                    path: base_path,
                    first: *first,
                    second: module.name(),
                });
            }

            let routes = group.describe();
            if let Some(i) = group.bindings().iter().position(|b| !b.is_routable()) {
                return Err(StartupError::UnsupportedMethod {
                    module: module.name(),
                    route: routes[i].clone(),
                });
            }
            let mut seen = HashSet::new();
            if let Some(route) = routes.iter().find(|route| !seen.insert(route.as_str())) {
                return Err(StartupError::DuplicateRoute {
                    module: module.name(),
                    route: route.clone(),
                });
            }

            for route in &routes {
                tracing::info!(module = module.name(), %route, "route mounted");
            }
            claimed.insert(base_path.clone(), module.name());
            app = app.nest(&base_path, group.into_router());
        }
        Ok(app)
    }

    /// Drop the cached mediator so the next `initialize` builds a new one.
    pub fn reset(&mut self) {
        if self.mediator.take().is_some() {
            tracing::debug!("mediator reset");
        }
    }

    /// The mediator, if `initialize` has run.
    pub fn mediator(&self) -> Option<&Arc<Mediator>> {
        self.mediator.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.mediator.is_some()
    }
}

/// A base path axum can nest under: `/segment[/segment...]`, no trailing
/// slash, no wildcards.
fn is_mountable(path: &str) -> bool {
    path.len() > 1 && path.starts_with('/') && !path.ends_with('/') && !path.contains('*')
}
