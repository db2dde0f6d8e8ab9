//! HTTP API integration tests
//! Drives a real server on an ephemeral port with reqwest.

mod common;

use common::*;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn login_token(client: &reqwest::Client, server: &TestServer, email: &str, password: &str) -> String {
    let body: Value = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn test_health() {
    let server = start_server(test_config()).await;
    let response = reqwest::get(format!("{}/api/health", server.base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_success_strips_password() {
    let server = start_server(test_config()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "email": USER_EMAIL, "password": USER_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.unwrap();
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["user"]["email"], USER_EMAIL);
    assert_eq!(body["user"]["isAdmin"], false);
    assert!(body["token"].as_str().unwrap().split('.').count() == 3);
    assert!(!text.contains("$2b$"));
    assert!(body["user"].get("hashedPassword").is_none());
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let server = start_server(test_config()).await;
    let client = reqwest::Client::new();

    for (email, password) in [(USER_EMAIL, "wrong"), ("nobody@x.com", USER_PASSWORD)] {
        let response = client
            .post(format!("{}/api/auth/login", server.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["message"],
            "Your login details could not be verified. Please try again."
        );
    }
}

#[tokio::test]
async fn test_register_and_me() {
    let server = start_server(test_config()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/auth/register", server.base_url))
        .json(&json!({
            "fullname": "Bob",
            "email": "bob@x.com",
            "password": "secret1",
            "repeatPassword": "secret1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap();

    let me: Value = client
        .get(format!("{}/api/auth/me", server.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["user"]["email"], "bob@x.com");
    assert_eq!(me["user"]["fullname"], "Bob");
}

#[tokio::test]
async fn test_register_validation_errors_joined() {
    let server = start_server(test_config()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/auth/register", server.base_url))
        .json(&json!({
            "fullname": "Bob",
            "email": "bob@x.com",
            "password": "secret1",
            "repeatPassword": "secret2"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "repeatPassword must match password");

    let response = client
        .post(format!("{}/api/auth/register", server.base_url))
        .json(&json!({ "email": "nope", "password": "x", "repeatPassword": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    let message = body["message"].as_str().unwrap();
    assert_eq!(message.split("; ").count(), 3);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = start_server(test_config()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/auth/register", server.base_url))
        .json(&json!({
            "fullname": "Alice Again",
            "email": USER_EMAIL,
            "password": "secret1",
            "repeatPassword": "secret1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = start_server(test_config()).await;
    let client = reqwest::Client::new();

    for path in ["/api/auth/me", "/api/equipment", "/api/users"] {
        let response = client
            .get(format!("{}{}", server.base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
        let body: Value = response.json().await.unwrap();
        assert!(body["message"].is_string());
    }

    let response = client
        .get(format!("{}/api/equipment", server.base_url))
        .bearer_auth("not.a.token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_equipment_crud() {
    let server = start_server(test_config()).await;
    let client = reqwest::Client::new();
    let token = login_token(&client, &server, USER_EMAIL, USER_PASSWORD).await;
    let url = format!("{}/api/equipment", server.base_url);

    let created: Value = client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "name": "Fire truck", "kind": "land" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let updated: Value = client
        .put(format!("{}/{}", url, id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Tow truck" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["data"]["name"], "Tow truck");

    let list: Vec<Value> = client
        .get(&url)
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.len(), 1);

    let response = client
        .delete(format!("{}/{}", url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/{}", url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users_admin_only() {
    let server = start_server(test_config()).await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/users", server.base_url);

    let user_token = login_token(&client, &server, USER_EMAIL, USER_PASSWORD).await;
    let response = client.get(&url).bearer_auth(&user_token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token = login_token(&client, &server, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let users: Vec<Value> = client
        .get(&url)
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("hashedPassword").is_none()));
}

#[tokio::test]
async fn test_unmatched_api_route() {
    let server = start_server(test_config()).await;
    let response = reqwest::get(format!("{}/api/nothing/here", server.base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let server = start_server(test_config()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/auth/login", server.base_url))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_static_dir_fallback() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>dashboard</html>").unwrap();

    let mut config = test_config();
    config.server.static_dir = Some(dir.path().to_path_buf());
    let server = start_server(config).await;

    let body = reqwest::get(format!("{}/equipment/123", server.base_url))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("dashboard"));

    let response = reqwest::get(format!("{}/api/missing", server.base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
