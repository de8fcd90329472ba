mod common;

use auth::TokenConfig;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/user/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({"message": "User Management Service v2.0 is up and running", "success": true})
    );
}

#[tokio::test]
async fn test_register_user_success() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "pw1").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User Registered Successfully");
    assert_eq!(body["success"], true);
    assert!(!body["data"]["user_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_user_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("alice", "pw1").await;
    let response = app.register("  alice ", "pw2").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], 409);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/user/register")
        .json(&json!({ "user_name": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"message": "Invalid Request", "success": false}));
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;

    let response = app.login("alice", "pw1").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User Logged In Successfully");
    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;

    let wrong_password = app.login("alice", "wrong").await;
    let unknown_user = app.login("mallory", "pw1").await;

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.status(), unknown_user.status());

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_user: Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_login_without_jwt_secret() {
    let app = TestApp::spawn_with(TokenConfig::default(), None).await;
    app.register("alice", "pw1").await;

    let response = app.login("alice", "pw1").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("jwt secret not set"));
}

#[tokio::test]
async fn test_validate_token() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice", "pw1").await;

    let response = app
        .post("/user/validate-token")
        .json(&json!({ "token": token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Token is valid");
    assert!(body["data"]["subject"].is_string());
    assert!(body["data"]["expires_at"].is_string());
}

#[tokio::test]
async fn test_validate_corrupted_token() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice", "pw1").await;

    let replacement = if token.ends_with('x') { 'y' } else { 'x' };
    let corrupted = format!("{}{}", &token[..token.len() - 1], replacement);

    let response = app
        .post("/user/validate-token")
        .json(&json!({ "token": corrupted }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("token error"));
}

#[tokio::test]
async fn test_get_user_requires_token() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;

    let response = app
        .get("/user/alice")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"message": "Unauthorized"}));
}

#[tokio::test]
async fn test_get_user_rejects_invalid_token() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw1").await;

    let response = app
        .get_authenticated("/user/alice", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().starts_with("token error"));
}

#[tokio::test]
async fn test_get_user_success() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice", "pw1").await;

    let response = app
        .get_authenticated("/user/alice", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User Fetched Successfully");
    assert_eq!(body["data"]["user_name"], "alice");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_get_unknown_user() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice", "pw1").await;

    let response = app
        .get_authenticated("/user/bob", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_get_order_success() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice", "pw1").await;

    let response = app
        .get_authenticated("/user/alice/order", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Order Fetched Successfully");
    assert_eq!(body["data"]["order_id"], "order-alice");
    assert_eq!(body["data"]["quantity"], 2);
}

#[tokio::test]
async fn test_get_order_upstream_failure() {
    let app = TestApp::spawn().await;
    let token = app.token_for("broken", "pw1").await;

    let response = app
        .get_authenticated("/user/broken/order", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error_code"], 502);
}

#[tokio::test]
async fn test_basic_auth_guards_credential_routes() {
    let app = TestApp::spawn_with_basic_auth("svc", "s3cret").await;

    let unauthenticated = app
        .api_client
        .post(format!("{}/user/register", app.address))
        .json(&json!({ "user_name": "alice", "password": "pw1" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let response = app.register("alice", "pw1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let health = app
        .get("/user/health")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(health.status(), StatusCode::OK);
}
