//! End-to-end user flows over HTTP.

use serde_json::{json, Value};

use crate::support::{recording_module, users_server, DELIVERY};

#[tokio::test]
async fn create_user_returns_201_and_notifies() {
    let (module, notifier) = recording_module();
    let base = users_server(module).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/users"))
        .json(&json!({ "email": "a@b.com", "name": "A" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["email"], "a@b.com");
    assert_eq!(body["name"], "A");
    assert!(body["createdAt"].is_string());

    assert_eq!(notifier.wait_for_attempts(1, DELIVERY).await, 1);
    assert_eq!(notifier.sent().unwrap()[0].0, "a@b.com");
}

#[tokio::test]
async fn duplicate_email_is_409() {
    let (module, notifier) = recording_module();
    let base = users_server(module).await;
    let client = reqwest::Client::new();

    for expected in [201, 409] {
        let resp = client
            .post(format!("{base}/users"))
            .json(&json!({ "email": "a@b.com", "name": "A" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), expected);

        if expected == 409 {
            let body: Value = resp.json().await.unwrap();
            assert_eq!(body, json!({ "code": "CONFLICT", "message": "User already exists" }));
        }
    }

    assert_eq!(notifier.wait_for_attempts(1, DELIVERY).await, 1);
    assert_eq!(notifier.count().unwrap(), 1);
}

#[tokio::test]
async fn email_case_is_preserved() {
    let (module, _) = recording_module();
    let base = users_server(module).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{base}/users"))
        .json(&json!({ "email": " Pat@Example.com " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["email"], "Pat@Example.com");
}

#[tokio::test]
async fn invalid_email_is_400_with_details() {
    let (module, notifier) = recording_module();
    let base = users_server(module).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/users"))
        .json(&json!({ "email": "not-an-email" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["details"]["email"], json!(["email must be a valid email address"]));
    assert_eq!(notifier.attempts(), 0);
    assert_eq!(notifier.count().unwrap(), 0);
}

#[tokio::test]
async fn missing_email_is_400() {
    let (module, _) = recording_module();
    let base = users_server(module).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/users"))
        .json(&json!({ "name": "A" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["details"]["email"], json!(["email is required"]));
}

#[tokio::test]
async fn get_user_round_trip() {
    let (module, _) = recording_module();
    let base = users_server(module).await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{base}/users"))
        .json(&json!({ "email": "a@b.com" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let resp = client.get(format!("{base}/users/{id}")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let found: Value = resp.json().await.unwrap();
    assert_eq!(found, created);
    assert_eq!(found["name"], Value::Null);
}

#[tokio::test]
async fn get_unknown_user_is_404() {
    let (module, _) = recording_module();
    let base = users_server(module).await;

    let resp = reqwest::get(format!("{base}/users/0190d4c2-7a8e-7000-8000-000000000000"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "code": "NOT_FOUND", "message": "User not found" }));
}

#[tokio::test]
async fn get_with_malformed_id_is_400() {
    let (module, _) = recording_module();
    let base = users_server(module).await;

    let resp = reqwest::get(format!("{base}/users/not-a-uuid")).await.unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["id"], json!(["id must be a valid UUID"]));
}
