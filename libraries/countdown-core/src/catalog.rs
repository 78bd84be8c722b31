//! Catalog operations

use crate::error::{CountdownError, Result};
use crate::storage::AlbumCatalog;
use crate::types::{Album, AlbumId, CreateAlbum, Rank, SeedReport};

/// Every album in countdown order (rank 500 first)
pub async fn list_all<S: AlbumCatalog + ?Sized>(store: &S) -> Result<Vec<Album>> {
    store.list_albums().await
}

pub async fn get_by_rank<S: AlbumCatalog + ?Sized>(store: &S, rank: Rank) -> Result<Album> {
    store
        .find_album_by_rank(rank)
        .await?
        .ok_or_else(|| CountdownError::not_found("Album with rank", rank))
}

pub async fn get_by_id<S: AlbumCatalog + ?Sized>(store: &S, id: AlbumId) -> Result<Album> {
    store
        .find_album_by_id(id)
        .await?
        .ok_or_else(|| CountdownError::not_found("Album", id))
}

/// Bulk-load albums. Re-seeding is safe: ranks already present are skipped.
///
/// Duplicate ranks within `rows` are rejected up front so a bad source file
/// cannot silently drop records.
pub async fn seed<S: AlbumCatalog + ?Sized>(store: &S, rows: Vec<CreateAlbum>) -> Result<SeedReport> {
    let mut seen = std::collections::HashSet::with_capacity(rows.len());
    for row in &rows {
        if row.artist.trim().is_empty() || row.title.trim().is_empty() {
            return Err(CountdownError::validation(format!(
                "Album at rank {} is missing an artist or title",
                row.rank
            )));
        }
        if !seen.insert(row.rank) {
            return Err(CountdownError::validation(format!(
                "Rank {} appears more than once in the catalog source",
                row.rank
            )));
        }
    }

    store.insert_albums(rows).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn row(rank: i64) -> CreateAlbum {
        CreateAlbum {
            rank: Rank::new(rank).unwrap(),
            artist: format!("Artist {rank}"),
            title: format!("Album {rank}"),
            info: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = MemoryStore::new();

        let first = seed(&store, vec![row(3), row(2), row(1)]).await.unwrap();
        assert_eq!(first, SeedReport { inserted: 3, skipped: 0 });

        let second = seed(&store, vec![row(4), row(3)]).await.unwrap();
        assert_eq!(second, SeedReport { inserted: 1, skipped: 1 });

        let ranks: Vec<u16> = list_all(&store)
            .await
            .unwrap()
            .iter()
            .map(|a| a.rank.get())
            .collect();
        assert_eq!(ranks, vec![4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn test_seed_rejects_duplicate_rank_in_source() {
        let store = MemoryStore::new();

        let err = seed(&store, vec![row(7), row(7)]).await.unwrap_err();
        assert!(matches!(err, CountdownError::Validation(_)));
        assert!(list_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_point_lookups() {
        let store = MemoryStore::new();
        seed(&store, vec![row(10), row(9)]).await.unwrap();

        let album = get_by_rank(&store, Rank::new(9).unwrap()).await.unwrap();
        assert_eq!(album.title, "Album 9");
        assert_eq!(get_by_id(&store, album.id).await.unwrap(), album);

        let missing = get_by_rank(&store, Rank::new(8).unwrap()).await;
        assert!(matches!(missing, Err(CountdownError::NotFound { .. })));
        let missing = get_by_id(&store, AlbumId::new(999)).await;
        assert!(matches!(missing, Err(CountdownError::NotFound { .. })));
    }
}
