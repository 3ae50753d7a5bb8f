//! Command-line interface
//!
//! With no subcommand the binary runs the HTTP server. `account`
//! subcommands work directly on the database.

pub mod account;

use clap::{Parser, Subcommand};

/// bank-api - account management service
#[derive(Parser, Debug)]
#[command(name = "bank-api")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    BANK_HOST              Bind address (default: 0.0.0.0)
    BANK_PORT              Listen port (default: 3000)
    BANK_DATABASE_URL      Database URL (default: sqlite://bank.db)
    BANK_JWT_SECRET        Token signing secret (required)
    BANK_JWT_SECRET_FILE   File holding the signing secret
    BANK_TOKEN_TTL_SECS    Token lifetime in seconds (default: 86400)
    BANK_LOG_LEVEL         Log level (default: info)
    BANK_LOG_DIR           Directory for JSON log files (disabled if unset)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage accounts
    Account {
        /// Account management subcommand
        #[command(subcommand)]
        command: account::AccountCommand,
    },
}
