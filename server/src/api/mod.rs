//! REST API handlers
//!
//! Accounts, login and transfer endpoints.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod health;
pub mod transfer;

use crate::auth::middleware::account_guard;
use crate::AppState;
use axum::{
    http::Method,
    middleware,
    routing::{get, post},
    Router,
};
use error::ApiError;
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn create_router(state: AppState) -> Router {
    // routes that act on a single account require a token for that account
    let guarded_routes = Router::new()
        .route(
            "/account/:id",
            get(accounts::get_account)
                .delete(accounts::delete_account)
                .fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            account_guard,
        ));

    Router::new()
        .route(
            "/account",
            get(accounts::list_accounts)
                .post(accounts::create_account)
                .fallback(method_not_allowed),
        )
        .route("/login", post(auth::login).fallback(method_not_allowed))
        .route(
            "/transfer",
            post(transfer::transfer).fallback(method_not_allowed),
        )
        .route("/health", get(health::health))
        .merge(guarded_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::BadRequest(format!("method not allowed: {}", method))
}
