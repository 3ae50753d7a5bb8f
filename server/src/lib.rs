//! bank-api server
//!
//! Account management over HTTP with token-gated per-account access.

#![warn(missing_docs)]

/// REST API handlers
pub mod api;

/// Password hashing, tokens and the access guard
pub mod auth;

/// Command-line interface
pub mod cli;

/// Environment configuration helpers
pub mod config;

/// Database access
pub mod db;

/// Token signing secret loading
pub mod jwt_secret;

/// Logging initialization
pub mod logging;

use auth::jwt::{TokenIssuer, TokenVerifier};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: sqlx::SqlitePool,
    /// Token issuer used at login
    pub token_issuer: Arc<TokenIssuer>,
    /// Token verifier used by the access guard
    pub token_verifier: Arc<TokenVerifier>,
}

impl AppState {
    /// Build state whose issuer and verifier share `jwt_secret`
    pub fn new(db_pool: sqlx::SqlitePool, jwt_secret: &str, token_ttl: chrono::Duration) -> Self {
        Self {
            db_pool,
            token_issuer: Arc::new(TokenIssuer::new(jwt_secret, token_ttl)),
            token_verifier: Arc::new(TokenVerifier::new(jwt_secret)),
        }
    }
}
