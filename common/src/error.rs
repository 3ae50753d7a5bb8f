//! Error types
//!
//! Unified error types (thiserror).

use thiserror::Error;

/// Why a token was rejected
///
/// Only ever logged; clients see a uniform denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// Not a three-segment base64url token with a readable header and claims
    #[error("malformed token")]
    Malformed,

    /// Header declares an algorithm other than the configured one
    #[error("unexpected signing algorithm")]
    AlgorithmMismatch,

    /// MAC does not match
    #[error("bad signature")]
    BadSignature,

    /// `expiresAt` is in the past
    #[error("token expired")]
    Expired,
}

/// Service error type
#[derive(Debug, Error)]
pub enum BankError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password hashing failed
    #[error("Credential error: {0}")]
    Credential(String),

    /// Token could not be issued
    #[error("Token error: {0}")]
    Token(String),

    /// Record not found
    #[error("{0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Login failed
    #[error("not authenticated")]
    Authentication,

    /// Invalid input
    #[error("{0}")]
    Validation(String),
}
