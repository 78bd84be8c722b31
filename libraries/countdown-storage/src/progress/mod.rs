//! Progress pointer queries

use countdown_core::{error::Result, types::*};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn from_row(row: &SqliteRow) -> ProgressRecord {
    ProgressRecord {
        account_id: AccountId::new(row.get("account_id")),
        current_album_id: AlbumId::new(row.get("current_album_id")),
        updated_at: crate::timestamp(row.get("updated_at")),
    }
}

pub async fn get(pool: &SqlitePool, account_id: AccountId) -> Result<Option<ProgressRecord>> {
    let row = sqlx::query(
        "SELECT account_id, current_album_id, updated_at FROM progress WHERE account_id = ?",
    )
    .bind(account_id.get())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Create the progress row for an account
///
/// The unique index on `account_id` rejects a second row with `Conflict`.
pub async fn create(
    pool: &SqlitePool,
    account_id: AccountId,
    album_id: AlbumId,
) -> Result<ProgressRecord> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO progress (account_id, current_album_id, updated_at)
         VALUES (?, ?, ?)",
    )
    .bind(account_id.get())
    .bind(album_id.get())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(ProgressRecord {
        account_id,
        current_album_id: album_id,
        updated_at: crate::timestamp(now),
    })
}

/// Compare-and-set the current album
///
/// Only moves the pointer if it still references `from`. Returns whether a
/// row was updated.
pub async fn advance(
    pool: &SqlitePool,
    account_id: AccountId,
    from: AlbumId,
    to: AlbumId,
) -> Result<bool> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "UPDATE progress
         SET current_album_id = ?, updated_at = ?
         WHERE account_id = ? AND current_album_id = ?",
    )
    .bind(to.get())
    .bind(now)
    .bind(account_id.get())
    .bind(from.get())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
