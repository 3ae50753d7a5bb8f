//! Account management subcommands

use crate::auth::password::hash_password;
use crate::db::accounts;
use bank_api_common::auth::{Account, NewAccount};
use bank_api_common::error::BankError;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

/// Account management commands
#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// List all accounts
    List,
    /// Add a new account
    Add(AddAccount),
    /// Delete an account
    Delete(DeleteAccount),
}

/// Arguments for adding an account
#[derive(Parser, Debug)]
pub struct AddAccount {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Login password
    #[arg(short, long)]
    pub password: String,
}

/// Arguments for deleting an account
#[derive(Parser, Debug)]
pub struct DeleteAccount {
    /// Internal account id
    pub id: i64,
}

/// Run `command` against `pool`, printing results to stdout
pub async fn execute(command: AccountCommand, pool: &SqlitePool) -> Result<(), BankError> {
    match command {
        AccountCommand::List => {
            let all = accounts::list(pool).await?;
            if all.is_empty() {
                println!("No accounts");
            }
            for account in &all {
                println!("{}", format_account(account));
            }
        }
        AccountCommand::Add(args) => {
            let account = add(pool, args).await?;
            println!("Created {}", format_account(&account));
        }
        AccountCommand::Delete(args) => {
            accounts::delete(pool, args.id).await?;
            println!("Deleted account {}", args.id);
        }
    }
    Ok(())
}

async fn add(pool: &SqlitePool, args: AddAccount) -> Result<Account, BankError> {
    let first_name = args.first_name.trim();
    let last_name = args.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(BankError::Validation(
            "first and last name are required".to_string(),
        ));
    }

    let password_hash = hash_password(&args.password)?;
    accounts::create(
        pool,
        &NewAccount {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password_hash,
        },
    )
    .await
}

fn format_account(account: &Account) -> String {
    format!(
        "#{} {} {} number={} balance={}",
        account.id, account.first_name, account.last_name, account.number, account.balance
    )
}
