//! Account API
//!
//! Create, list, fetch and delete accounts. `/account/:id` handlers sit
//! behind the access guard.

use crate::api::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use bank_api_common::auth::{Account, NewAccount};
use bank_api_common::error::BankError;
use serde::{Deserialize, Serialize};

/// Account creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Plaintext password, hashed before storage
    pub password: String,
}

/// Delete response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    /// Id of the deleted account
    pub deleted: i64,
}

/// GET /account - list accounts
pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = crate::db::accounts::list(&state.db_pool).await?;
    Ok(Json(accounts))
}

/// POST /account - create an account
///
/// # Returns
/// * `200 OK` - the stored account (without its password hash)
/// * `400 Bad Request` - invalid body, hashing or storage failure
pub async fn create_account(
    State(state): State<AppState>,
    body: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(request) = body?;

    let first_name = request.first_name.trim();
    let last_name = request.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(BankError::Validation("firstName and lastName are required".to_string()).into());
    }

    let password = request.password;
    let password_hash =
        tokio::task::spawn_blocking(move || crate::auth::password::hash_password(&password))
            .await
            .map_err(|e| BankError::Credential(format!("Password hashing task failed: {}", e)))??;

    let account = crate::db::accounts::create(
        &state.db_pool,
        &NewAccount {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(id = account.id, number = account.number, "Account created");

    Ok(Json(account))
}

/// GET /account/:id - fetch one account
pub async fn get_account(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Account>, ApiError> {
    let id = parse_id(&raw_id)?;

    let account = crate::db::accounts::find_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| BankError::NotFound(format!("account {} not found", id)))?;

    Ok(Json(account))
}

/// DELETE /account/:id - hard-delete an account
pub async fn delete_account(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteAccountResponse>, ApiError> {
    let id = parse_id(&raw_id)?;

    crate::db::accounts::delete(&state.db_pool, id).await?;
    tracing::info!(id, "Account deleted");

    Ok(Json(DeleteAccountResponse { deleted: id }))
}

fn parse_id(raw_id: &str) -> Result<i64, BankError> {
    raw_id
        .parse()
        .map_err(|_| BankError::Validation(format!("invalid id given {}", raw_id)))
}
