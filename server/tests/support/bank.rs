use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bank_api::{api, auth, db, AppState};
use bank_api_common::auth::{Account, NewAccount};
use chrono::{Duration, Utc};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-integration-tests";

/// bcrypt minimum cost
const TEST_HASH_COST: u32 = 4;

pub async fn create_test_db_pool() -> SqlitePool {
    db::migrations::initialize_database("sqlite::memory:")
        .await
        .expect("Failed to initialize test database")
}

pub fn test_state(db_pool: SqlitePool) -> AppState {
    AppState::new(db_pool, TEST_JWT_SECRET, Duration::hours(24))
}

/// Router over a fresh in-memory database
pub async fn build_app() -> (Router, SqlitePool) {
    let db_pool = create_test_db_pool().await;
    (api::create_router(test_state(db_pool.clone())), db_pool)
}

/// Insert an account with a known number, hashing at the minimum cost
pub async fn create_account(
    pool: &SqlitePool,
    first_name: &str,
    last_name: &str,
    password: &str,
    number: i64,
) -> Account {
    let password_hash = auth::password::hash_password_with_cost(password, TEST_HASH_COST).unwrap();
    db::accounts::create_with_number(
        pool,
        &NewAccount {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password_hash,
        },
        number,
    )
    .await
    .unwrap()
}

pub fn token_for(number: i64) -> String {
    auth::jwt::TokenIssuer::new(TEST_JWT_SECRET, Duration::hours(1))
        .issue(number, Utc::now())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-jwt-token", token);
    }
    builder.body(Body::empty()).unwrap()
}

/// Send `request` and decode the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
