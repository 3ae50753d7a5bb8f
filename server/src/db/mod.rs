//! Database access layer (SQLite via sqlx)

/// Account persistence
pub mod accounts;

/// Pool creation and migrations
pub mod migrations;
