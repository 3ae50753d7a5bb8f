//! Account CRUD operations

use bank_api_common::auth::{Account, NewAccount, ACCOUNT_NUMBER_RANGE};
use bank_api_common::error::BankError;
use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::SqlitePool;

/// How many account numbers to draw before giving up on a create
pub const MAX_NUMBER_ATTEMPTS: usize = 8;

const SELECT_ACCOUNT: &str =
    "SELECT id, first_name, last_name, number, password_hash, balance, created_at FROM accounts";

/// Create an account with a random account number
///
/// Numbers are drawn from `[0, ACCOUNT_NUMBER_RANGE)`. A draw that collides
/// with an existing account is discarded and redrawn.
///
/// # Returns
/// * `Ok(Account)` - the stored account
/// * `Err(BankError::Database)` - insert failed or no free number was found
pub async fn create(pool: &SqlitePool, new: &NewAccount) -> Result<Account, BankError> {
    create_with_generator(pool, new, generate_account_number).await
}

/// Create an account, drawing candidate numbers from `next_number`
pub async fn create_with_generator<F>(
    pool: &SqlitePool,
    new: &NewAccount,
    mut next_number: F,
) -> Result<Account, BankError>
where
    F: FnMut() -> i64,
{
    for attempt in 1..=MAX_NUMBER_ATTEMPTS {
        let number = next_number();
        if let Some(account) = try_insert(pool, new, number).await? {
            return Ok(account);
        }
        tracing::warn!(attempt, number, "Account number already taken, drawing again");
    }

    Err(BankError::Database(format!(
        "Failed to allocate an account number after {} attempts",
        MAX_NUMBER_ATTEMPTS
    )))
}

/// Create an account with a fixed account number
///
/// # Returns
/// * `Ok(Account)` - the stored account
/// * `Err(BankError::Validation)` - the number is already in use
/// * `Err(BankError::Database)` - insert failed
pub async fn create_with_number(
    pool: &SqlitePool,
    new: &NewAccount,
    number: i64,
) -> Result<Account, BankError> {
    try_insert(pool, new, number)
        .await?
        .ok_or_else(|| BankError::Validation(format!("Account number {} already exists", number)))
}

/// Insert, returning `None` when `number` is taken
async fn try_insert(
    pool: &SqlitePool,
    new: &NewAccount,
    number: i64,
) -> Result<Option<Account>, BankError> {
    let created_at = Utc::now();

    let result = sqlx::query(
        "INSERT INTO accounts (first_name, last_name, number, password_hash, balance, created_at)
         VALUES (?, ?, ?, ?, 0, ?)",
    )
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(number)
    .bind(&new.password_hash)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await;

    match result {
        Ok(done) => Ok(Some(Account {
            id: done.last_insert_rowid(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            number,
            password_hash: new.password_hash.clone(),
            balance: 0,
            created_at,
        })),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
        Err(e) => Err(BankError::Database(format!(
            "Failed to create account: {}",
            e
        ))),
    }
}

/// Find an account by internal id
///
/// # Returns
/// * `Ok(Some(Account))` - found
/// * `Ok(None)` - no such account
/// * `Err(BankError)` - query failed
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Account>, BankError> {
    let row = sqlx::query_as::<_, AccountRow>(&format!("{} WHERE id = ?", SELECT_ACCOUNT))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| BankError::Database(format!("Failed to find account: {}", e)))?;

    row.map(AccountRow::into_account).transpose()
}

/// Find an account by public account number
pub async fn find_by_number(pool: &SqlitePool, number: i64) -> Result<Option<Account>, BankError> {
    let row = sqlx::query_as::<_, AccountRow>(&format!("{} WHERE number = ?", SELECT_ACCOUNT))
        .bind(number)
        .fetch_optional(pool)
        .await
        .map_err(|e| BankError::Database(format!("Failed to find account: {}", e)))?;

    row.map(AccountRow::into_account).transpose()
}

/// List all accounts in creation order
pub async fn list(pool: &SqlitePool) -> Result<Vec<Account>, BankError> {
    let rows = sqlx::query_as::<_, AccountRow>(&format!("{} ORDER BY id", SELECT_ACCOUNT))
        .fetch_all(pool)
        .await
        .map_err(|e| BankError::Database(format!("Failed to list accounts: {}", e)))?;

    rows.into_iter().map(AccountRow::into_account).collect()
}

/// Hard-delete an account
///
/// # Returns
/// * `Ok(())` - deleted
/// * `Err(BankError::NotFound)` - no such account
/// * `Err(BankError::Database)` - delete failed
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), BankError> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| BankError::Database(format!("Failed to delete account: {}", e)))?;

    if result.rows_affected() == 0 {
        return Err(BankError::NotFound(format!("account {} not found", id)));
    }

    Ok(())
}

/// Draw a random account number in `[0, ACCOUNT_NUMBER_RANGE)`
pub fn generate_account_number() -> i64 {
    rand::thread_rng().gen_range(0..ACCOUNT_NUMBER_RANGE)
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    first_name: String,
    last_name: String,
    number: i64,
    password_hash: String,
    balance: i64,
    created_at: String,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, BankError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| {
                BankError::Database(format!(
                    "Invalid created_at for account {}: {}",
                    self.id, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(Account {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            number: self.number,
            password_hash: self.password_hash,
            balance: self.balance,
            created_at,
        })
    }
}
