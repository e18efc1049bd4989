mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;
use user_management::account::models::Role;

async fn admin(app: &TestApp) -> String {
    app.token_for("admin", Role::Admin).await
}

async fn create(app: &TestApp, token: &str, path: &str, body: Value) -> Value {
    let response = app
        .post_authenticated(path, token)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_user_crud() {
    let app = TestApp::spawn().await;
    let token = admin(&app).await;

    let student = create(&app, &token, "/user-types", json!({ "name": "Student" })).await;
    let gold = create(
        &app,
        &token,
        "/subscription-types",
        json!({ "name": "Gold", "accessMonths": 12, "priceCents": 9990, "productKey": "gold-12" }),
    )
    .await;

    let created = create(
        &app,
        &token,
        "/users",
        json!({
            "name": "Ana Souza",
            "email": "ana@x.com",
            "phone": "(11) 98765-4321",
            "cpf": "123.456.789-09",
            "dtSubscription": "2024-01-01",
            "dtExpiration": "2025-01-01",
            "userTypeId": student["id"],
            "subscriptionTypeId": gold["id"]
        }),
    )
    .await;
    assert_eq!(created["phone"], "11987654321");
    assert_eq!(created["cpf"], "12345678909");
    assert_eq!(created["dtExpiration"], "2025-01-01");
    let id = created["id"].as_i64().unwrap();

    for path in [
        format!("/users/{}", id),
        "/users/email/ana@x.com".to_string(),
        "/users/phone/11-98765-4321".to_string(),
        "/users/cpf/12345678909".to_string(),
    ] {
        let response = app
            .get_authenticated(&path, &token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["id"], id);
    }

    let response = app
        .put_authenticated(&format!("/users/{}", id), &token)
        .json(&json!({ "name": "Ana Lima", "email": "ana.lima@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["name"], "Ana Lima");
    assert!(updated["phone"].is_null());

    let listed: Value = app
        .get_authenticated("/users", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let response = app
        .delete_authenticated(&format!("/users/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/users/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Resource Not Found");
}

#[tokio::test]
async fn test_user_conflicts() {
    let app = TestApp::spawn().await;
    let token = admin(&app).await;
    create(
        &app,
        &token,
        "/users",
        json!({ "name": "Ana", "email": "ana@x.com", "cpf": "12345678909" }),
    )
    .await;

    for body in [
        json!({ "name": "Other", "email": "ana@x.com" }),
        json!({ "name": "Other", "email": "other@x.com", "cpf": "123.456.789-09" }),
    ] {
        let response = app
            .post_authenticated("/users", &token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}

#[tokio::test]
async fn test_user_validation_and_references() {
    let app = TestApp::spawn().await;
    let token = admin(&app).await;

    let response = app
        .post_authenticated("/users", &token)
        .json(&json!({ "name": " ", "email": "bad", "phone": "12" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["details"]["name"].is_string());
    assert!(body["details"]["email"].is_string());
    assert!(body["details"]["phone"].is_string());

    let response = app
        .post_authenticated("/users", &token)
        .json(&json!({ "name": "Ana", "email": "ana@x.com", "userTypeId": 999 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .get_authenticated("/users/abc", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_type_crud_and_in_use() {
    let app = TestApp::spawn().await;
    let token = admin(&app).await;

    let student = create(
        &app,
        &token,
        "/user-types",
        json!({ "name": "Student", "description": "Enrolled students" }),
    )
    .await;
    let id = student["id"].as_i64().unwrap();

    let response = app
        .post_authenticated("/user-types", &token)
        .json(&json!({ "name": "Student" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let by_name: Value = app
        .get_authenticated("/user-types/name/Student", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(by_name["id"], id);

    let response = app
        .put_authenticated(&format!("/user-types/{}", id), &token)
        .json(&json!({ "name": "Undergraduate", "description": "" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["name"], "Undergraduate");
    assert!(updated["description"].is_null());

    create(
        &app,
        &token,
        "/users",
        json!({ "name": "Ana", "email": "ana@x.com", "userTypeId": id }),
    )
    .await;

    let response = app
        .delete_authenticated(&format!("/user-types/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Data Integrity Violation");
}

#[tokio::test]
async fn test_subscription_type_crud() {
    let app = TestApp::spawn().await;
    let token = admin(&app).await;

    let gold = create(
        &app,
        &token,
        "/subscription-types",
        json!({ "name": "Gold", "accessMonths": 12, "priceCents": 9990, "productKey": "gold-12" }),
    )
    .await;
    let id = gold["id"].as_i64().unwrap();
    assert_eq!(gold["accessMonths"], 12);
    assert_eq!(gold["priceCents"], 9990);

    let response = app
        .post_authenticated("/subscription-types", &token)
        .json(&json!({ "name": "Platinum", "productKey": "gold-12" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    for path in [
        format!("/subscription-types/{}", id),
        "/subscription-types/product-key/gold-12".to_string(),
        "/subscription-types/name/Gold".to_string(),
    ] {
        let body: Value = app
            .get_authenticated(&path, &token)
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");
        assert_eq!(body["id"], id, "GET {}", path);
    }

    let response = app
        .put_authenticated(&format!("/subscription-types/{}", id), &token)
        .json(&json!({ "name": "Gold", "accessMonths": 6, "priceCents": 4990, "productKey": "gold-12" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["accessMonths"], 6);

    let response = app
        .post_authenticated("/subscription-types", &token)
        .json(&json!({ "name": "Broken", "priceCents": -1 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .delete_authenticated(&format!("/subscription-types/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/subscription-types/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
