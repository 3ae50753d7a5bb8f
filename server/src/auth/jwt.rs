//! Token issuing and verification (jsonwebtoken, HS256)
//!
//! Tokens are compact JWS strings carrying [`Claims`]. Both halves take the
//! shared secret at construction and the current time per call, so neither
//! reads the environment or the clock.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use bank_api_common::auth::Claims;
use bank_api_common::error::{BankError, TokenRejection};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

/// The only accepted signing algorithm
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Signs claims for an account number
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer for `secret` whose tokens live for `ttl`
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token asserting `account_number`, expiring at `now + ttl`
    ///
    /// # Returns
    /// * `Ok(String)` - `header.claims.signature`
    /// * `Err(BankError::Token)` - expiry overflow or signing failure
    pub fn issue(&self, account_number: i64, now: DateTime<Utc>) -> Result<String, BankError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| BankError::Token("Failed to calculate expiration time".to_string()))?
            .timestamp();

        let claims = Claims {
            account_number,
            expires_at,
        };

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.key)
            .map_err(|e| BankError::Token(format!("Failed to create token: {}", e)))
    }
}

/// Validates tokens produced by a [`TokenIssuer`] with the same secret
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for `secret`
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // expiry lives in `expiresAt` and is checked against the caller's clock
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify `token` at time `now`
    ///
    /// Checks run in order: wire format, declared algorithm, signature,
    /// expiry. The first failure decides the rejection.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenRejection> {
        let algorithm = declared_algorithm(token)?;
        if algorithm.parse::<Algorithm>().ok() != Some(TOKEN_ALGORITHM) {
            return Err(TokenRejection::AlgorithmMismatch);
        }

        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify(e.kind()))?;

        if claims.is_expired_at(now.timestamp()) {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}

/// Read the `alg` field of the token header without trusting anything else
fn declared_algorithm(token: &str) -> Result<String, TokenRejection> {
    let mut segments = token.split('.');
    let (Some(header), Some(_claims), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenRejection::Malformed);
    };

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenRejection::Malformed)?;
    let header: serde_json::Value =
        serde_json::from_slice(&header).map_err(|_| TokenRejection::Malformed)?;

    header
        .get("alg")
        .and_then(|alg| alg.as_str())
        .map(str::to_string)
        .ok_or(TokenRejection::Malformed)
}

fn classify(kind: &ErrorKind) -> TokenRejection {
    match kind {
        ErrorKind::InvalidSignature => TokenRejection::BadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenRejection::AlgorithmMismatch
        }
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        _ => TokenRejection::Malformed,
    }
}
