mod common;

use auth::TokenIssuer;
use chrono::Duration;
use common::TestApp;
use common::TEST_SECRET;
use reqwest::StatusCode;
use serde_json::json;
use user_management::account::models::AccountStatus;
use user_management::account::models::Role;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@x.com",
            "password": "Secret123!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["accessToken"].is_string());
    assert!(body["refreshToken"].is_string());
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["expiresIn"], 24 * 3600);
    assert_eq!(body["userInfo"]["username"], "alice");
    assert_eq!(body["userInfo"]["email"], "alice@x.com");
    assert_eq!(body["userInfo"]["role"], "USER");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@x.com", "Secret123!").await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "username": "alice2",
            "email": "alice@x.com",
            "password": "Secret123!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], 409);
    assert_eq!(body["error"], "Duplicate Resource");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already in use"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@x.com", "Secret123!").await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "other@x.com",
            "password": "Secret123!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_invalid_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "username": "al",
            "email": "not-an-email",
            "password": "123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Validation Failed");
    assert!(body["details"]["username"].is_string());
    assert!(body["details"]["email"].is_string());
    assert!(body["details"]["password"].is_string());
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .header("content-type", "application/json")
        .body("{\"username\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid JSON format in request body");
}

#[tokio::test]
async fn test_login_by_username_and_email() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@x.com", "Secret123!").await;

    for identifier in ["alice", "alice@x.com"] {
        let body = app.login(identifier, "Secret123!").await;
        assert_eq!(body["userInfo"]["username"], "alice");

        let token = body["accessToken"].as_str().unwrap();
        let subject = common::token_issuer().extract_subject(token).unwrap();
        assert_eq!(subject, "alice");
    }
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@x.com", "Secret123!").await;

    let response = app
        .post("/auth/login")
        .json(&json!({
            "usernameOrEmail": "alice",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid credentials or authentication token");
}

#[tokio::test]
async fn test_login_unknown_account_looks_like_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/login")
        .json(&json!({
            "usernameOrEmail": "nobody",
            "password": "Secret123!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid credentials or authentication token");
}

#[tokio::test]
async fn test_login_disabled_account() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@x.com", "Secret123!").await;
    app.store
        .set_account_status(
            "alice",
            AccountStatus {
                enabled: false,
                ..AccountStatus::active()
            },
        )
        .await
        .unwrap();

    let response = app
        .post("/auth/login")
        .json(&json!({
            "usernameOrEmail": "alice",
            "password": "Secret123!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_valid_access_token() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice", "alice@x.com", "Secret123!").await;

    let response = app
        .post("/auth/refresh")
        .json(&json!({ "refreshToken": registered["refreshToken"] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["accessToken"].as_str().unwrap();
    assert!(app.token_issuer.validate(token));
    assert_eq!(body["userInfo"]["username"], "alice");
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice", "alice@x.com", "Secret123!").await;

    let response = app
        .post("/auth/refresh")
        .json(&json!({ "refreshToken": registered["accessToken"] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_refresh_rejects_expired_and_malformed() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@x.com", "Secret123!").await;

    let expired = TokenIssuer::new(TEST_SECRET, Duration::hours(1), Duration::seconds(-5))
        .issue_refresh_token("alice", "USER")
        .unwrap();

    for token in [expired.as_str(), "not.a.token"] {
        let response = app
            .post("/auth/refresh")
            .json(&json!({ "refreshToken": token }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_refresh_requires_token() {
    let app = TestApp::spawn().await;

    for body in [json!({}), json!({ "refreshToken": "  " })] {
        let response = app
            .post("/auth/refresh")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_validate_reports_token_state() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice", "alice@x.com", "Secret123!").await;
    let token = registered["accessToken"].as_str().unwrap().to_string();

    // First signature character carries no padding bits
    let signature_start = token.rfind('.').unwrap() + 1;
    let original = &token[signature_start..signature_start + 1];
    let replacement = if original == "A" { "B" } else { "A" };
    let mut altered = token.clone();
    altered.replace_range(signature_start..signature_start + 1, replacement);

    let foreign = TokenIssuer::new(
        b"another-secret-key-that-is-32-bytes-or-more",
        Duration::hours(1),
        Duration::hours(1),
    )
    .issue_access_token("alice", "USER")
    .unwrap();

    let expired = TokenIssuer::new(TEST_SECRET, Duration::seconds(-5), Duration::hours(1))
        .issue_access_token("alice", "USER")
        .unwrap();

    let cases = [
        (token.as_str(), true, "Valid token"),
        (registered["refreshToken"].as_str().unwrap(), true, "Valid token"),
        (altered.as_str(), false, "Invalid or expired token"),
        (foreign.as_str(), false, "Invalid or expired token"),
        (expired.as_str(), false, "Invalid or expired token"),
    ];

    for (token, valid, message) in cases {
        let response = app
            .post("/auth/validate")
            .json(&json!({ "token": token }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["valid"], valid);
        assert_eq!(body["message"], message);
    }
}

#[tokio::test]
async fn test_validate_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/validate")
        .json(&json!({ "token": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "valid": false, "message": "Token not provided" }));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "UP");
    assert_eq!(body["service"], "User Management Authentication Service");
    assert!(body["timestamp"].is_i64());
}

#[tokio::test]
async fn test_me_returns_token_account() {
    let app = TestApp::spawn().await;
    let token = app.token_for("mod_mia", Role::Moderator).await;

    let response = app
        .get_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({
            "username": "mod_mia",
            "email": "mod_mia@example.com",
            "role": "MODERATOR"
        })
    );
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    let app = std::sync::Arc::new(TestApp::spawn().await);

    let attempts = (0..8).map(|i| {
        let app = std::sync::Arc::clone(&app);
        tokio::spawn(async move {
            app.post("/auth/register")
                .json(&json!({
                    "username": format!("racer{}", i),
                    "email": "race@x.com",
                    "password": "Secret123!"
                }))
                .send()
                .await
                .expect("Failed to execute request")
                .status()
        })
    });

    let mut statuses = Vec::new();
    for attempt in attempts.collect::<Vec<_>>() {
        statuses.push(attempt.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert!(statuses
        .iter()
        .all(|s| *s == StatusCode::OK || *s == StatusCode::CONFLICT));
}
