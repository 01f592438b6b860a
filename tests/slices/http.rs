//! Transport behavior shared by every feature.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use vertical_slice::features::users::{InMemoryUserRepository, UserRepository, UsersModule};
use vertical_slice::http;

use crate::support::{recording_module, start_server, users_server, SlowNotifier, SlowRepository};

#[tokio::test]
async fn health_check() {
    let base = start_server(http::base_router()).await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn malformed_json_is_validation_error() {
    let (module, _) = recording_module();
    let base = users_server(module).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/users"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (module, _) = recording_module();
    let base = users_server(module).await;
    let client = reqwest::Client::new();

    let unknown_path = client.get(format!("{base}/nope")).send().await.unwrap();
    let unbound_method = client.delete(format!("{base}/users")).send().await.unwrap();

    for resp in [unknown_path, unbound_method] {
        assert_eq!(resp.status(), 404);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "code": "NOT_FOUND", "message": "Route not found" }));
    }
}

#[tokio::test]
async fn slow_request_times_out_as_internal_error() {
    let module = UsersModule::with_repository(
        || {
            Arc::new(SlowRepository {
                inner: InMemoryUserRepository::new(),
                delay: Duration::from_secs(5),
            }) as Arc<dyn UserRepository>
        },
        Arc::new(SlowNotifier {
            delay: Duration::ZERO,
        }),
    )
    .with_request_timeout(Some(Duration::from_millis(50)));
    let base = users_server(module).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/users"))
        .json(&json!({ "email": "a@b.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "code": "INTERNAL_ERROR", "message": "Request timed out" }));
}

#[tokio::test]
async fn slow_notifier_does_not_time_out_a_stored_create() {
    let notifier = Arc::new(SlowNotifier {
        delay: Duration::from_millis(300),
    });
    let module = UsersModule::in_memory(notifier).with_request_timeout(Some(Duration::from_millis(50)));
    let base = users_server(module).await;
    let client = reqwest::Client::new();

    for expected in [201, 409] {
        let resp = client
            .post(format!("{base}/users"))
            .json(&json!({ "email": "a@b.com" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), expected);
    }
}
