use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use vertical_slice::features::users::{
    Email, InMemoryNotifier, InMemoryUserRepository, Notification, Notifier, NotifyError,
    RepositoryError, User, UserId, UserRepository, UsersModule,
};
use vertical_slice::{http, Startup};

/// Bind to port 0 and return the base URL.
pub async fn start_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serve the users feature over an in-memory store.
pub async fn users_server(module: UsersModule) -> String {
    let mut startup = Startup::new().module(module);
    startup.initialize().unwrap();
    let app = startup.register_routes(http::base_router()).unwrap();
    start_server(app).await
}

/// How long tests wait for a background notification.
pub const DELIVERY: Duration = Duration::from_secs(5);

pub fn recording_module() -> (UsersModule, InMemoryNotifier) {
    let notifier = InMemoryNotifier::new();
    (UsersModule::in_memory(Arc::new(notifier.clone())), notifier)
}

/// Takes `delay` to deliver anything.
pub struct SlowNotifier {
    pub delay: Duration,
}

#[async_trait]
impl Notifier for SlowNotifier {
    async fn notify(&self, _target: &str, _notification: &Notification) -> Result<(), NotifyError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// An in-memory store whose `save` takes `delay`.
#[derive(Clone)]
pub struct SlowRepository {
    pub inner: InMemoryUserRepository,
    pub delay: Duration,
}

#[async_trait]
impl UserRepository for SlowRepository {
    async fn save(&self, user: User) -> Result<User, RepositoryError> {
        tokio::time::sleep(self.delay).await;
        self.inner.save(user).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.inner.find_by_id(id).await
    }
}
