//! Database initialization and migrations

use bank_api_common::error::BankError;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

const MAX_CONNECTIONS: u32 = 5;

/// Create the SQLite pool and run migrations
///
/// In-memory databases get a single long-lived connection, since every
/// SQLite connection to `:memory:` opens a separate database.
///
/// # Arguments
/// * `database_url` - e.g. "sqlite://bank.db" or "sqlite::memory:"
///
/// # Returns
/// * `Ok(SqlitePool)` - initialized pool
/// * `Err(BankError)` - initialization failed
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, BankError> {
    if !Sqlite::database_exists(database_url)
        .await
        .map_err(|e| BankError::Database(format!("Failed to check database: {}", e)))?
    {
        tracing::info!("Creating database: {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| BankError::Database(format!("Failed to create database: {}", e)))?;
    }

    let options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = options
        .connect(database_url)
        .await
        .map_err(|e| BankError::Database(format!("Failed to connect to database: {}", e)))?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run embedded migrations from `server/migrations`
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), BankError> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| BankError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
