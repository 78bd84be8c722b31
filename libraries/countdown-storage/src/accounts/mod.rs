//! Account queries

use countdown_core::{error::Result, types::*};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Account {
    Account {
        id: AccountId::new(row.get("id")),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: crate::timestamp(row.get("created_at")),
    }
}

/// Create an account
///
/// Username and email are unique; a duplicate comes back as
/// `CountdownError::Conflict`.
pub async fn create(pool: &SqlitePool, account: NewAccount) -> Result<Account> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO accounts (username, email, password_hash, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&account.username)
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Account {
        id: AccountId::new(result.last_insert_rowid()),
        username: account.username,
        email: account.email,
        password_hash: account.password_hash,
        created_at: crate::timestamp(now),
    })
}

pub async fn get_by_id(pool: &SqlitePool, id: AccountId) -> Result<Option<Account>> {
    let row = sqlx::query(
        "SELECT id, username, email, password_hash, created_at FROM accounts WHERE id = ?",
    )
    .bind(id.get())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<Account>> {
    let row = sqlx::query(
        "SELECT id, username, email, password_hash, created_at FROM accounts WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

pub async fn get_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Account>> {
    let row = sqlx::query(
        "SELECT id, username, email, password_hash, created_at FROM accounts WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Get all accounts
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Account>> {
    let rows = sqlx::query(
        "SELECT id, username, email, password_hash, created_at FROM accounts ORDER BY username",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}
