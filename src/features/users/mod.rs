//! Users feature: create and read users.
//!
//! Requests: `users.create` ([`CreateUser`], command) and `users.get`
//! ([`GetUser`], query). Routes are mounted under `/users`.
//!
//! ```ignore
//! let notifier = Arc::new(LogNotifier);
//! let mut startup = Startup::new().module(UsersModule::in_memory(notifier));
//! let mediator = startup.initialize()?;
//! let user = mediator.send(CreateUserBody { email: Some("a@b.com".into()), name: None }.validate()?).await?;
//! ```

mod controller;
mod create_user;
mod email;
mod get_user;
mod notifier;
mod repository;
mod user;

use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "postgres")]
use sqlx::PgPool;

use crate::mediator::{Mediator, RegistrationError};
use crate::module::{FeatureModule, RouteGroup};

pub use controller::{UserResponse, UsersController};
pub use create_user::{CreateUser, CreateUserBody, CreateUserHandler};
pub use email::{Email, EmailError};
pub use get_user::{GetUser, GetUserHandler};
pub use notifier::{InMemoryNotifier, LogNotifier, Notification, Notifier, NotifyError};
#[cfg(feature = "postgres")]
pub use repository::PgUserRepository;
pub use repository::{InMemoryUserRepository, RepositoryError, UserRepository};
pub use user::{User, UserId, MAX_NAME_LEN};

/// Builds the repository for one `register_handlers` call.
pub type RepositoryFactory = Arc<dyn Fn() -> Arc<dyn UserRepository> + Send + Sync>;

/// Where the users feature keeps its data.
#[derive(Clone)]
enum UserStore {
    /// A new empty map for every `register_handlers` call.
    InMemory,
    #[cfg(feature = "postgres")]
    Postgres(PgPool),
    Custom(RepositoryFactory),
}

/// The users feature module.
#[derive(Clone)]
pub struct UsersModule {
    store: UserStore,
    notifier: Arc<dyn Notifier>,
    request_timeout: Option<Duration>,
}

impl UsersModule {
    /// Users kept in process memory.
    pub fn in_memory(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store: UserStore::InMemory,
            notifier,
            request_timeout: None,
        }
    }

    /// Users kept in Postgres. The schema must already exist
    /// (see [`PgUserRepository::ensure_schema`]).
    #[cfg(feature = "postgres")]
    pub fn postgres(pool: PgPool, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store: UserStore::Postgres(pool),
            notifier,
            request_timeout: None,
        }
    }

    /// Users kept in whatever `factory` returns, called once per
    /// `register_handlers`.
    pub fn with_repository<F>(factory: F, notifier: Arc<dyn Notifier>) -> Self
    where
        F: Fn() -> Arc<dyn UserRepository> + Send + Sync + 'static,
    {
        Self {
            store: UserStore::Custom(Arc::new(factory)),
            notifier,
            request_timeout: None,
        }
    }

    /// Fail requests that take longer than `timeout` at the HTTP boundary.
    ///
    /// Uses builder pattern; returns `self` for chaining.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn repository(&self) -> Arc<dyn UserRepository> {
        match &self.store {
            UserStore::InMemory => Arc::new(InMemoryUserRepository::new()),
            #[cfg(feature = "postgres")]
            UserStore::Postgres(pool) => Arc::new(PgUserRepository::new(pool.clone())),
            UserStore::Custom(factory) => factory(),
        }
    }
}

impl FeatureModule for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    fn register_handlers(&self, mediator: &mut Mediator) -> Result<(), RegistrationError> {
        let repository = self.repository();
        mediator.register_command(CreateUserHandler::new(
            Arc::clone(&repository),
            Arc::clone(&self.notifier),
        ))?;
        mediator.register_query(GetUserHandler::new(repository))
    }

    fn register_routes(&self, mediator: Arc<Mediator>) -> RouteGroup {
        UsersController::new(mediator, self.request_timeout).routes()
    }
}
