//! Account and token claim models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the public account number range
pub const ACCOUNT_NUMBER_RANGE: i64 = 1_000_000;

/// A bank account
///
/// `password_hash` is never serialized to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Storage-assigned id, used for path addressing (`/account/{id}`)
    pub id: i64,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Public account number, bound into issued tokens
    pub number: i64,
    /// bcrypt hash of the account password
    #[serde(default, skip_serializing)]
    pub password_hash: String,
    /// Current balance
    pub balance: i64,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
}

/// An account that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// bcrypt hash of the account password
    pub password_hash: String,
}

/// Token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Account number the bearer acts as
    pub account_number: i64,
    /// Expiry (Unix timestamp, seconds)
    pub expires_at: i64,
}

impl Claims {
    /// Whether the claims are expired at `now` (Unix seconds)
    ///
    /// A token is still valid at exactly `expires_at`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at
    }
}
