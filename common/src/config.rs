//! Configuration
//!
//! Server settings with serde defaults. Environment overrides are applied by
//! the server crate.

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig {
    /// Bind address (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database URL (default: "sqlite://bank.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Token lifetime in seconds (default: 86400)
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite://bank.db".to_string()
}

fn default_token_ttl() -> u64 {
    24 * 60 * 60
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

impl BankConfig {
    /// `host:port` string for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
