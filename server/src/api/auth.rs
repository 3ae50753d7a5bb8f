//! Login API

use crate::api::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use bank_api_common::error::BankError;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account number
    pub number: i64,
    /// Plaintext password
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Account number the token is bound to
    pub number: i64,
    /// Token to send in `x-jwt-token`
    pub token: String,
}

/// POST /login - exchange account number and password for a token
///
/// Unknown numbers and wrong passwords fail identically.
///
/// # Returns
/// * `200 OK` - `{number, token}`
/// * `400 Bad Request` - `{"error": "not authenticated"}` or a body error
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = body?;

    let Some(account) =
        crate::db::accounts::find_by_number(&state.db_pool, request.number).await?
    else {
        tracing::warn!(number = request.number, "Login failed: unknown account number");
        return Err(BankError::Authentication.into());
    };

    let password = request.password;
    let password_hash = account.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || {
        crate::auth::password::verify_password(&password, &password_hash)
    })
    .await
    .map_err(|e| BankError::Credential(format!("Password verification task failed: {}", e)))?;

    if !is_valid {
        tracing::warn!(number = account.number, "Login failed: wrong password");
        return Err(BankError::Authentication.into());
    }

    let token = state.token_issuer.issue(account.number, Utc::now())?;
    tracing::info!(number = account.number, "Token issued");

    Ok(Json(LoginResponse {
        number: account.number,
        token,
    }))
}
