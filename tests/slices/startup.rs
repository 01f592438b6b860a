use std::sync::Arc;

use axum::http::Method;
use axum::Router;
use vertical_slice::features::users::{CreateUser, Email, InMemoryNotifier, UsersModule};
use vertical_slice::{
    ErrorCode, FeatureModule, Mediator, RegistrationError, RouteGroup, Startup, StartupError,
};

use crate::support::{recording_module, DELIVERY};

/// Claims `/users` without registering anything.
struct ShadowUsers;

impl FeatureModule for ShadowUsers {
    fn name(&self) -> &'static str {
        "shadow"
    }

    fn register_handlers(&self, _mediator: &mut Mediator) -> Result<(), RegistrationError> {
        Ok(())
    }

    fn register_routes(&self, _mediator: Arc<Mediator>) -> RouteGroup {
        RouteGroup::new("/users").bind(Method::GET, "/", || async { "shadow" })
    }
}

#[test]
fn routes_before_initialize_fail() {
    let (module, _) = recording_module();
    let startup = Startup::new().module(module);

    let err = startup.register_routes(Router::new()).unwrap_err();
    assert_eq!(err, StartupError::NotInitialized);
}

#[tokio::test]
async fn reset_builds_a_fresh_mediator() {
    let (module, notifier) = recording_module();
    let mut startup = Startup::new().module(module);

    let first = startup.initialize().unwrap();
    let cmd = || CreateUser {
        email: Email::parse("a@b.com").unwrap(),
        name: None,
    };
    first.send(cmd()).await.unwrap();

    startup.reset();
    assert!(!startup.is_initialized());

    let second = startup.initialize().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.request_names(), vec!["users.create", "users.get"]);

    // The old store went with the old mediator.
    assert!(second.send(cmd()).await.is_ok());
    assert_eq!(notifier.wait_for_attempts(2, DELIVERY).await, 2);
}

#[test]
fn initialize_is_idempotent() {
    let (module, _) = recording_module();
    let mut startup = Startup::new().module(module);

    let first = startup.initialize().unwrap();
    let second = startup.initialize().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn registering_a_feature_twice_aborts_startup() {
    let notifier = Arc::new(InMemoryNotifier::new());
    let mut startup = Startup::new()
        .module(UsersModule::in_memory(notifier.clone()))
        .module(UsersModule::in_memory(notifier));

    let err = startup.initialize().unwrap_err();
    assert!(matches!(
        err,
        StartupError::Registration {
            module: "users",
            source: RegistrationError::Duplicate { name: "users.create", .. },
        }
    ));
    assert!(!startup.is_initialized());
}

#[test]
fn base_path_collision_fails_startup() {
    let (module, _) = recording_module();
    let mut startup = Startup::new().module(module).module(ShadowUsers);
    startup.initialize().unwrap();

    let err = startup.register_routes(Router::new()).unwrap_err();
    assert_eq!(
        err,
        StartupError::BasePathCollision {
            path: "/users".into(),
            first: "users",
            second: "shadow",
        }
    );
}

#[tokio::test]
async fn mediator_works_without_transport() {
    let (module, notifier) = recording_module();
    let mut startup = Startup::new().module(module);
    let mediator = startup.initialize().unwrap();

    let user = mediator
        .send(CreateUser {
            email: Email::parse("a@b.com").unwrap(),
            name: Some("A".into()),
        })
        .await
        .unwrap();
    assert_eq!(user.name(), Some("A"));
    assert_eq!(notifier.wait_for_attempts(1, DELIVERY).await, 1);

    let err = Mediator::new()
        .send(CreateUser {
            email: Email::parse("a@b.com").unwrap(),
            name: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Internal);
    assert_eq!(err.message(), "No handler registered for users.create");
}
