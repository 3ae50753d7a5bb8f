//! Transfer API
//!
//! Accepts a transfer request and echoes it back. No balances move.

use crate::api::error::ApiError;
use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

/// Transfer request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Destination account number
    pub to_account: i64,
    /// Amount to move
    pub amount: i64,
}

/// POST /transfer
pub async fn transfer(
    body: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<TransferRequest>, ApiError> {
    let Json(request) = body?;
    tracing::debug!(
        to_account = request.to_account,
        amount = request.amount,
        "Transfer requested"
    );
    Ok(Json(request))
}
