//! Password hashing and verification (bcrypt)

use bank_api_common::error::BankError;
use bcrypt::{hash, verify};

/// bcrypt cost used for new accounts (~250ms per hash)
pub const HASH_COST: u32 = 12;

/// bcrypt only looks at the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password with [`HASH_COST`]
///
/// # Returns
/// * `Ok(String)` - bcrypt hash string (`$2b$...`)
/// * `Err(BankError::Credential)` - input too long or hashing failed
pub fn hash_password(password: &str) -> Result<String, BankError> {
    hash_password_with_cost(password, HASH_COST)
}

/// Hash a password with an explicit bcrypt cost
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, BankError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(BankError::Credential(format!(
            "password exceeds {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }

    hash(password, cost)
        .map_err(|e| BankError::Credential(format!("Failed to hash password: {}", e)))
}

/// Check a plaintext password against a stored bcrypt hash
///
/// Returns `false` on mismatch and also when the stored hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match verify(password, password_hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}
