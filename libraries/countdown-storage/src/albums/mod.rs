//! Catalog queries

use countdown_core::{error::Result, types::*};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Result<Album> {
    Ok(Album {
        id: AlbumId::new(row.get("id")),
        rank: Rank::new(row.get("rank"))?,
        artist: row.get("artist"),
        title: row.get("album"),
        info: row.get("info"),
        description: row.get("description"),
    })
}

/// All albums in countdown order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query(
        "SELECT id, rank, artist, album, info, description
         FROM albums
         ORDER BY rank DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(
        "SELECT id, rank, artist, album, info, description
         FROM albums
         WHERE id = ?",
    )
    .bind(id.get())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn get_by_rank(pool: &SqlitePool, rank: Rank) -> Result<Option<Album>> {
    let row = sqlx::query(
        "SELECT id, rank, artist, album, info, description
         FROM albums
         WHERE rank = ?",
    )
    .bind(i64::from(rank))
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM albums")
        .fetch_one(pool)
        .await?;
    Ok(row.get("count"))
}

/// Insert albums in one transaction, leaving existing ranks untouched
pub async fn insert_many(pool: &SqlitePool, albums: Vec<CreateAlbum>) -> Result<SeedReport> {
    let mut report = SeedReport::default();
    let mut tx = pool.begin().await?;

    for album in albums {
        let result = sqlx::query(
            "INSERT INTO albums (rank, artist, album, info, description)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(rank) DO NOTHING",
        )
        .bind(i64::from(album.rank))
        .bind(&album.artist)
        .bind(&album.title)
        .bind(&album.info)
        .bind(&album.description)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            report.skipped += 1;
        } else {
            report.inserted += 1;
        }
    }

    tx.commit().await?;

    Ok(report)
}
