//! Access guard on `/account/:id`

use crate::support::bank::{
    build_app, create_account, create_test_db_pool, empty_request, send, test_state, token_for,
    TEST_JWT_SECRET,
};
use axum::{http::StatusCode, middleware, routing::get, Router};
use bank_api::auth::jwt::TokenIssuer;
use bank_api::auth::middleware::account_guard;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

fn denied() -> serde_json::Value {
    json!({"error": "permission denied"})
}

#[tokio::test]
async fn test_missing_token_is_denied() {
    let (app, _db_pool) = build_app().await;

    let (status, body) = send(&app, empty_request("GET", "/account/7", None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, denied());
}

#[tokio::test]
async fn test_token_for_other_account_is_denied() {
    let (app, db_pool) = build_app().await;
    let ada = create_account(&db_pool, "Ada", "Lovelace", "secret", 111111).await;
    create_account(&db_pool, "Alan", "Turing", "enigma", 222222).await;

    let (status, body) = send(
        &app,
        empty_request("GET", &format!("/account/{}", ada.id), Some(&token_for(222222))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, denied());

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/account/{}", ada.id), Some(&token_for(222222))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, denied());
}

#[tokio::test]
async fn test_every_rejection_looks_the_same() {
    let (app, db_pool) = build_app().await;
    let ada = create_account(&db_pool, "Ada", "Lovelace", "secret", 111111).await;
    let path = format!("/account/{}", ada.id);

    let expired = TokenIssuer::new(TEST_JWT_SECRET, Duration::hours(1))
        .issue(111111, Utc::now() - Duration::hours(2))
        .unwrap();
    let foreign = TokenIssuer::new("some-other-secret", Duration::hours(1))
        .issue(111111, Utc::now())
        .unwrap();
    let own = token_for(111111);
    let forged_claims = base64::Engine::encode(
        &base64::engine::general_purpose::URL_SAFE_NO_PAD,
        r#"{"accountNumber":111111,"expiresAt":9999999999}"#,
    );
    let mut parts: Vec<&str> = own.split('.').collect();
    parts[1] = &forged_claims;
    let tampered = parts.join(".");

    let cases = vec![
        (path.clone(), "garbage".to_string()),
        (path.clone(), expired),
        (path.clone(), foreign),
        (path.clone(), tampered),
        ("/account/abc".to_string(), own.clone()),
        ("/account/99999".to_string(), own.clone()),
    ];

    for (uri, token) in cases {
        let (status, body) = send(&app, empty_request("GET", &uri, Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "uri {} token {}", uri, token);
        assert_eq!(body, denied());
    }
}

#[tokio::test]
async fn test_bearer_authorization_header_is_not_accepted() {
    let (app, db_pool) = build_app().await;
    let ada = create_account(&db_pool, "Ada", "Lovelace", "secret", 111111).await;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri(format!("/account/{}", ada.id))
        .header("authorization", format!("Bearer {}", token_for(111111)))
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, denied());
}

#[tokio::test]
async fn test_owner_is_forwarded_exactly_once() {
    let db_pool = create_test_db_pool().await;
    let ada = create_account(&db_pool, "Ada", "Lovelace", "secret", 111111).await;
    let state = test_state(db_pool);

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new()
        .route(
            "/account/:id",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    "forwarded"
                }
            }),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), account_guard))
        .with_state(state);

    let response = tower::ServiceExt::oneshot(
        app.clone(),
        empty_request("GET", &format!("/account/{}", ada.id), Some(&token_for(111111))),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"forwarded");
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // a denied request never reaches the handler
    let response = tower::ServiceExt::oneshot(
        app,
        empty_request("GET", &format!("/account/{}", ada.id), Some(&token_for(222222))),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
