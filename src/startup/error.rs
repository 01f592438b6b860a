use crate::mediator::RegistrationError;

/// Configuration faults detected while starting the application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartupError {
    /// Routes were requested before `initialize` built the mediator.
    #[error("startup is not initialized; call initialize() before register_routes()")]
    NotInitialized,
    /// A module failed to register its handlers.
    #[error("module {module} failed to register handlers: {source}")]
    Registration {
        module: &'static str,
        #[source]
        source: RegistrationError,
    },
    /// Two modules claimed the same base path.
    #[error("base path {path} is claimed by both {first} and {second}")]
    BasePathCollision {
        path: String,
        first: &'static str,
        second: &'static str,
    },
    /// A module declared a base path that cannot be mounted.
    #[error("module {module} declared invalid base path {path:?}")]
    InvalidBasePath { module: &'static str, path: String },
    /// A route group binds the same method and path twice.
    #[error("module {module} binds {route} more than once")]
    DuplicateRoute { module: &'static str, route: String },
    /// A route group binds a method the router cannot dispatch on.
    #[error("module {module} binds unsupported route {route}")]
    UnsupportedMethod { module: &'static str, route: String },
}
