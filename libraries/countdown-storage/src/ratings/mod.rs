//! Rating queries

use countdown_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

/// Insert a rating or overwrite the score of an existing one
///
/// A single statement, so two concurrent submissions for the same album end
/// with one row holding whichever score was written last. `created_at` is
/// kept from the first submission.
pub async fn upsert(
    pool: &SqlitePool,
    account_id: AccountId,
    album_id: AlbumId,
    score: Score,
) -> Result<Rating> {
    let now = chrono::Utc::now().timestamp();

    let row = sqlx::query(
        "INSERT INTO ratings (account_id, album_id, rating, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT(account_id, album_id)
         DO UPDATE SET rating = excluded.rating, updated_at = excluded.updated_at
         RETURNING id, account_id, album_id, rating, created_at, updated_at",
    )
    .bind(account_id.get())
    .bind(album_id.get())
    .bind(i64::from(score))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(Rating {
        id: row.get("id"),
        account_id: AccountId::new(row.get("account_id")),
        album_id: AlbumId::new(row.get("album_id")),
        score: Score::new(row.get("rating"))?,
        created_at: crate::timestamp(row.get("created_at")),
        updated_at: crate::timestamp(row.get("updated_at")),
    })
}

/// Get an account's ratings joined with album details, rank 500 first
pub async fn get_for_account(pool: &SqlitePool, account_id: AccountId) -> Result<Vec<RatedAlbum>> {
    let rows = sqlx::query(
        r#"
        SELECT r.id, r.album_id, r.rating, r.created_at,
               a.rank, a.artist, a.album
        FROM ratings r
        JOIN albums a ON a.id = r.album_id
        WHERE r.account_id = ?
        ORDER BY a.rank DESC
        "#,
    )
    .bind(account_id.get())
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let album_id = AlbumId::new(row.get("album_id"));
            Ok(RatedAlbum {
                id: row.get("id"),
                album_id,
                score: Score::new(row.get("rating"))?,
                created_at: crate::timestamp(row.get("created_at")),
                album: AlbumSummary {
                    id: album_id,
                    rank: Rank::new(row.get("rank"))?,
                    artist: row.get("artist"),
                    title: row.get("album"),
                },
            })
        })
        .collect()
}
