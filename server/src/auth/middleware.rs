//! Access guard for per-account routes
//!
//! Runs in two stages joined by a plain [`Claims`] value:
//!
//! 1. [`authenticate`]: pure token check on the request headers
//! 2. [`authorize`]: one store read resolving the path id, then an identity
//!    comparison
//!
//! Every failure produces the same 403 response. The cause is only logged.

use crate::api::error::ApiError;
use crate::auth::jwt::TokenVerifier;
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bank_api_common::auth::{Account, Claims};
use bank_api_common::error::TokenRejection;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;

/// Header carrying the bearer token
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// Internal reason for denying a request
#[derive(Debug, Error)]
pub enum Denial {
    /// No usable `x-jwt-token` header
    #[error("missing token header")]
    MissingToken,

    /// Token failed verification
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenRejection),

    /// Path id is not an integer
    #[error("invalid account id {0:?}")]
    InvalidId(String),

    /// No account stored under the path id
    #[error("account {0} not found")]
    UnknownAccount(i64),

    /// Store lookup failed
    #[error("account lookup failed: {0}")]
    Store(String),

    /// Token belongs to a different account
    #[error("token for account number {claimed} used on account {id}")]
    NotOwner {
        /// Account number asserted by the token
        claimed: i64,
        /// Internal id addressed by the path
        id: i64,
    },
}

/// Stage 1: extract and verify the token from `headers`
pub fn authenticate(
    headers: &HeaderMap,
    verifier: &TokenVerifier,
    now: DateTime<Utc>,
) -> Result<Claims, Denial> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or(Denial::MissingToken)?;

    Ok(verifier.verify(token, now)?)
}

/// Stage 2: resolve `raw_id` and check it belongs to the token's account
pub async fn authorize(
    pool: &SqlitePool,
    claims: &Claims,
    raw_id: &str,
) -> Result<Account, Denial> {
    let id: i64 = raw_id
        .parse()
        .map_err(|_| Denial::InvalidId(raw_id.to_string()))?;

    let account = crate::db::accounts::find_by_id(pool, id)
        .await
        .map_err(|e| Denial::Store(e.to_string()))?
        .ok_or(Denial::UnknownAccount(id))?;

    if account.number != claims.account_number {
        return Err(Denial::NotOwner {
            claimed: claims.account_number,
            id,
        });
    }

    Ok(account)
}

/// Guard middleware for routes with an `:id` path parameter
///
/// On success the verified [`Claims`] are added to the request extensions and
/// the wrapped handler runs once.
pub async fn account_guard(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    mut request: Request,
    next: Next,
) -> Response {
    let raw_id = match path {
        Ok(Path(raw_id)) => raw_id,
        Err(e) => {
            tracing::warn!("Access denied: unreadable path parameter: {}", e);
            return ApiError::PermissionDenied.into_response();
        }
    };

    let checked = match authenticate(request.headers(), &state.token_verifier, Utc::now()) {
        Ok(claims) => authorize(&state.db_pool, &claims, &raw_id)
            .await
            .map(|_| claims),
        Err(denial) => Err(denial),
    };

    match checked {
        Ok(claims) => {
            tracing::debug!(
                account_number = claims.account_number,
                "Access granted to account {}",
                raw_id
            );
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(denial) => {
            tracing::warn!(path_id = %raw_id, "Access denied: {}", denial);
            ApiError::PermissionDenied.into_response()
        }
    }
}
