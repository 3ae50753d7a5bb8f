//! bank-api common library
//!
//! Account model, token claims, configuration and error types shared by the
//! server binary and its tests.

#![warn(missing_docs)]

/// Account and token claim models
pub mod auth;

/// Configuration
pub mod config;

/// Error types
pub mod error;
