//! Configuration management via environment variables
//!
//! Reads `BANK_*` variables, falling back to older unprefixed names with a
//! deprecation warning.

use bank_api_common::config::BankConfig;
use bank_api_common::error::BankError;

/// Get an environment variable with fallback to a deprecated name
///
/// # Returns
/// * `Some(value)` - value of `new_name`, else of `old_name`
/// * `None` - neither variable is set
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Like [`get_env_with_fallback`], parsed into `T`, with a default for
/// missing or unparsable values
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Build the server configuration from the environment
///
/// | variable              | fallback         |
/// |-----------------------|------------------|
/// | `BANK_HOST`           | `HOST`           |
/// | `BANK_PORT`           | `PORT`           |
/// | `BANK_DATABASE_URL`   | `DATABASE_URL`   |
/// | `BANK_TOKEN_TTL_SECS` | `TOKEN_TTL_SECS` |
pub fn load_config() -> BankConfig {
    let defaults = BankConfig::default();

    BankConfig {
        host: get_env_with_fallback("BANK_HOST", "HOST").unwrap_or(defaults.host),
        port: get_env_with_fallback_parse("BANK_PORT", "PORT", defaults.port),
        database_url: get_env_with_fallback("BANK_DATABASE_URL", "DATABASE_URL")
            .unwrap_or(defaults.database_url),
        token_ttl_secs: get_env_with_fallback_parse(
            "BANK_TOKEN_TTL_SECS",
            "TOKEN_TTL_SECS",
            defaults.token_ttl_secs,
        ),
    }
}

/// Token lifetime from `config.token_ttl_secs`
///
/// # Returns
/// * `Ok(Duration)` - the lifetime
/// * `Err(BankError::Config)` - too large to represent
pub fn token_ttl(config: &BankConfig) -> Result<chrono::Duration, BankError> {
    i64::try_from(config.token_ttl_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .ok_or_else(|| {
            BankError::Config(format!(
                "token lifetime {}s is out of range",
                config.token_ttl_secs
            ))
        })
}
