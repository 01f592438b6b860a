use std::collections::BTreeMap;

use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;

use crate::http::route_not_found;

/// One method + path binding inside a [`RouteGroup`].
///
/// The route only answers `method`. An extension method axum cannot filter
/// on leaves the binding unroutable, and startup rejects it.
pub struct RouteBinding<S = ()> {
    method: Method,
    path: String,
    route: Option<MethodRouter<S>>,
}

impl<S> RouteBinding<S> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_routable(&self) -> bool {
        self.route.is_some()
    }
}

/// The routes a feature owns, mounted under a shared base path.
///
/// Handlers are bound with their state type `S`; [`RouteGroup::with_state`]
/// supplies it, giving the `RouteGroup<()>` a [`FeatureModule`](super::FeatureModule)
/// returns.
pub struct RouteGroup<S = ()> {
    base_path: String,
    bindings: Vec<RouteBinding<S>>,
}

impl<S> RouteGroup<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            bindings: Vec::new(),
        }
    }

    /// Bind `method path` (relative to the base path) to `handler`.
    ///
    /// Uses builder pattern; returns `self` for chaining.
    pub fn bind<H, T>(mut self, method: Method, path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let route = MethodFilter::try_from(method.clone())
            .ok()
            .map(|filter| on(filter, handler));
        self.bindings.push(RouteBinding {
            method,
            path: path.into(),
            route,
        });
        self
    }

    /// Provide the state every bound handler extracts.
    pub fn with_state<S2>(self, state: S) -> RouteGroup<S2> {
        RouteGroup {
            base_path: self.base_path,
            bindings: self
                .bindings
                .into_iter()
                .map(|binding| RouteBinding {
                    method: binding.method,
                    path: binding.path,
                    route: binding.route.map(|route| route.with_state(state.clone())),
                })
                .collect(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn bindings(&self) -> &[RouteBinding<S>] {
        &self.bindings
    }

    /// `METHOD /base/path` for every binding, for logs and tests.
    pub fn describe(&self) -> Vec<String> {
        self.bindings
            .iter()
            .map(|b| {
                let path = b.path.trim_end_matches('/');
                format!("{} {}{}", b.method, self.base_path, path)
            })
            .collect()
    }
}

impl RouteGroup {
    /// Build the router for this group, relative to the base path.
    ///
    /// Bindings sharing a path are merged into one method router; a method
    /// nobody bound renders the same not-found body as an unknown path.
    /// Callers must reject unroutable and duplicate bindings first.
    pub(crate) fn into_router(self) -> Router {
        let mut by_path: BTreeMap<String, MethodRouter> = BTreeMap::new();
        for binding in self.bindings {
            let Some(route) = binding.route else {
                continue;
            };
            let merged = match by_path.remove(&binding.path) {
                Some(existing) => existing.merge(route),
                None => route.fallback(route_not_found),
            };
            by_path.insert(binding.path, merged);
        }

        by_path
            .into_iter()
            .fold(Router::new(), |router, (path, route)| router.route(&path, route))
    }
}
