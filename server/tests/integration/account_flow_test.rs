//! Account lifecycle over HTTP: create, login, fetch, delete

use crate::support::bank::{build_app, empty_request, json_request, send};
use axum::http::StatusCode;
use bank_api::auth::password::verify_password;
use bank_api::db::accounts;
use bank_api_common::auth::ACCOUNT_NUMBER_RANGE;
use serde_json::json;

#[tokio::test]
async fn test_create_then_login() {
    let (app, db_pool) = build_app().await;

    // Step 1: create
    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/account",
            &json!({"firstName": "Ada", "lastName": "Lovelace", "password": "secret"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["firstName"], "Ada");
    assert_eq!(created["lastName"], "Lovelace");
    assert_eq!(created["balance"], 0);
    assert!(created.get("passwordHash").is_none(), "hash must not be serialized");
    assert!(created.get("password").is_none());

    let number = created["number"].as_i64().unwrap();
    assert!((0..ACCOUNT_NUMBER_RANGE).contains(&number));

    let stored = accounts::find_by_number(&db_pool, number)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.password_hash.is_empty());
    assert_ne!(stored.password_hash, "secret");
    assert!(verify_password("secret", &stored.password_hash));

    // Step 2: login with the right password
    let (status, login) = send(
        &app,
        json_request("POST", "/login", &json!({"number": number, "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["number"], number);
    let token = login["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);

    // Step 3: login with the wrong password
    let (status, body) = send(
        &app,
        json_request("POST", "/login", &json!({"number": number, "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "not authenticated"}));
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_unknown_number_matches_wrong_password() {
    let (app, _db_pool) = build_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/login", &json!({"number": 123456, "password": "secret"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "not authenticated"}));
}

#[tokio::test]
async fn test_token_from_login_opens_own_account() {
    let (app, _db_pool) = build_app().await;

    let (_, created) = send(
        &app,
        json_request(
            "POST",
            "/account",
            &json!({"firstName": "Grace", "lastName": "Hopper", "password": "cobol"}),
        ),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    let number = created["number"].as_i64().unwrap();

    let (_, login) = send(
        &app,
        json_request("POST", "/login", &json!({"number": number, "password": "cobol"})),
    )
    .await;
    let token = login["token"].as_str().unwrap().to_string();

    let (status, account) = send(
        &app,
        empty_request("GET", &format!("/account/{}", id), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["id"], id);
    assert_eq!(account["number"], number);
    assert!(account.get("passwordHash").is_none());

    let (status, deleted) = send(
        &app,
        empty_request("DELETE", &format!("/account/{}", id), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"deleted": id}));

    // the account is gone, so the same token no longer opens anything
    let (status, body) = send(
        &app,
        empty_request("GET", &format!("/account/{}", id), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"error": "permission denied"}));
}

#[tokio::test]
async fn test_list_accounts() {
    let (app, _db_pool) = build_app().await;

    let (status, body) = send(&app, empty_request("GET", "/account", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for (first, last) in [("Ada", "Lovelace"), ("Alan", "Turing")] {
        send(
            &app,
            json_request(
                "POST",
                "/account",
                &json!({"firstName": first, "lastName": last, "password": "pw"}),
            ),
        )
        .await;
    }

    let (status, body) = send(&app, empty_request("GET", "/account", None)).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["firstName"], "Ada");
    assert_eq!(listed[1]["firstName"], "Alan");
    assert!(listed.iter().all(|a| a.get("passwordHash").is_none()));
}

#[tokio::test]
async fn test_create_rejects_bad_bodies() {
    let (app, _db_pool) = build_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/account",
            &json!({"firstName": "  ", "lastName": "Lovelace", "password": "secret"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("required"));

    let (status, body) = send(
        &app,
        json_request("POST", "/account", &json!({"firstName": "Ada"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let long_password = "x".repeat(73);
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/account",
            &json!({"firstName": "Ada", "lastName": "Lovelace", "password": long_password}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
