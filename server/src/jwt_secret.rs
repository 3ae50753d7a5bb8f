//! Token signing secret
//!
//! The secret is read once at startup and handed to the token issuer and
//! verifier. It is never generated: a missing or empty secret stops startup.

use crate::config::get_env_with_fallback;
use bank_api_common::error::BankError;
use std::fs;
use std::path::Path;

/// Environment variable holding the secret
pub const JWT_SECRET_ENV: &str = "BANK_JWT_SECRET";
/// Deprecated name for [`JWT_SECRET_ENV`]
pub const LEGACY_JWT_SECRET_ENV: &str = "JWT_SECRET";
/// Environment variable naming a file that holds the secret
pub const JWT_SECRET_FILE_ENV: &str = "BANK_JWT_SECRET_FILE";

/// Load the signing secret
///
/// Priority:
/// 1. `BANK_JWT_SECRET` (or deprecated `JWT_SECRET`)
/// 2. Contents of the file named by `BANK_JWT_SECRET_FILE`, trimmed
///
/// # Returns
/// * `Ok(secret)` - non-empty secret
/// * `Err(BankError::Config)` - no source set, file unreadable, or secret empty
pub fn load_jwt_secret() -> Result<String, BankError> {
    if let Some(secret) = get_env_with_fallback(JWT_SECRET_ENV, LEGACY_JWT_SECRET_ENV) {
        if secret.is_empty() {
            return Err(BankError::Config(format!("{} is empty", JWT_SECRET_ENV)));
        }
        tracing::info!("Using JWT secret from environment variable");
        return Ok(secret);
    }

    if let Ok(path) = std::env::var(JWT_SECRET_FILE_ENV) {
        let secret = read_secret_file(Path::new(&path))?;
        if secret.is_empty() {
            return Err(BankError::Config(format!("JWT secret file {} is empty", path)));
        }
        tracing::info!("Using JWT secret from file: {}", path);
        return Ok(secret);
    }

    Err(BankError::Config(format!(
        "JWT secret not configured: set {} or {}",
        JWT_SECRET_ENV, JWT_SECRET_FILE_ENV
    )))
}

fn read_secret_file(path: &Path) -> Result<String, BankError> {
    fs::read_to_string(path)
        .map(|secret| secret.trim().to_string())
        .map_err(|e| {
            BankError::Config(format!(
                "Failed to read JWT secret file {}: {}",
                path.display(),
                e
            ))
        })
}
