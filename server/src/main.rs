//! bank-api server entry point

use bank_api::{api, cli, config, db, jwt_secret, logging, AppState};
use bank_api_common::{config::BankConfig, error::BankError};
use clap::Parser;
use sqlx::SqlitePool;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: cli::Cli) -> Result<(), BankError> {
    let config = config::load_config();
    let db_pool = db::migrations::initialize_database(&config.database_url).await?;

    match cli.command {
        Some(cli::Commands::Account { command }) => {
            cli::account::execute(command, &db_pool).await
        }
        None => run_server(config, db_pool).await,
    }
}

async fn run_server(config: BankConfig, db_pool: SqlitePool) -> Result<(), BankError> {
    info!("bank-api v{}", env!("CARGO_PKG_VERSION"));

    let secret = jwt_secret::load_jwt_secret()?;
    let ttl = config::token_ttl(&config)?;
    let state = AppState::new(db_pool, &secret, ttl);
    info!("Token lifetime: {}s", state.token_issuer.ttl().num_seconds());

    let router = api::create_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| BankError::Config(format!("Failed to bind to {}: {}", bind_addr, e)))?;

    info!("Server listening on {}", bind_addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| BankError::Config(format!("Server error: {}", e)))
}
