//! Rating ledger

use crate::error::{CountdownError, Result};
use crate::storage::{AlbumCatalog, RatingRepository};
use crate::types::{AccountId, AlbumId, RatedAlbum, Rating, Score};

/// Record a score for an album, replacing any earlier score by the same
/// account. Both fields arrive optional so a missing one is a validation
/// failure rather than a decoding error.
pub async fn submit<S>(
    store: &S,
    account_id: AccountId,
    album_id: Option<i64>,
    rating: Option<i64>,
) -> Result<Rating>
where
    S: AlbumCatalog + RatingRepository + ?Sized,
{
    // Album ids start at 1, so 0 is treated as absent
    let album_id = album_id.filter(|&id| id != 0);
    let (Some(album_id), Some(rating)) = (album_id, rating) else {
        return Err(CountdownError::validation("Missing album_id or rating"));
    };
    let score = Score::new(rating)?;
    let album_id = AlbumId::new(album_id);

    if store.find_album_by_id(album_id).await?.is_none() {
        return Err(CountdownError::not_found("Album", album_id));
    }

    store.upsert_rating(account_id, album_id, score).await
}

/// The account's ratings in countdown order (rank 500 first)
pub async fn list_for_account<S>(store: &S, account_id: AccountId) -> Result<Vec<RatedAlbum>>
where
    S: RatingRepository + ?Sized,
{
    store.list_ratings(account_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::memory::MemoryStore;
    use crate::types::{CreateAlbum, Rank};

    const ACCOUNT: AccountId = AccountId::new(1);

    async fn store_with(ranks: &[i64]) -> MemoryStore {
        let store = MemoryStore::new();
        let rows = ranks
            .iter()
            .map(|&rank| CreateAlbum {
                rank: Rank::new(rank).unwrap(),
                artist: format!("Artist {rank}"),
                title: format!("Album {rank}"),
                info: Some("info".into()),
                description: None,
            })
            .collect();
        catalog::seed(&store, rows).await.unwrap();
        store
    }

    async fn album_id(store: &MemoryStore, rank: i64) -> i64 {
        catalog::get_by_rank(store, Rank::new(rank).unwrap())
            .await
            .unwrap()
            .id
            .get()
    }

    #[tokio::test]
    async fn test_resubmission_overwrites() {
        let store = store_with(&[500, 499]).await;
        let id = album_id(&store, 500).await;

        let first = submit(&store, ACCOUNT, Some(id), Some(2)).await.unwrap();
        let second = submit(&store, ACCOUNT, Some(id), Some(5)).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.score.get(), 5);
        assert_eq!(first.created_at, second.created_at);

        let ratings = list_for_account(&store, ACCOUNT).await.unwrap();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].score.get(), 5);
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_scores() {
        let store = store_with(&[500]).await;
        let id = album_id(&store, 500).await;

        for bad in [0, 6, -1, 100] {
            let err = submit(&store, ACCOUNT, Some(id), Some(bad)).await.unwrap_err();
            assert!(matches!(err, CountdownError::Validation(_)), "score {bad}");
        }
        assert!(list_for_account(&store, ACCOUNT).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let store = store_with(&[500]).await;

        let err = submit(&store, ACCOUNT, None, Some(3)).await.unwrap_err();
        assert!(matches!(err, CountdownError::Validation(_)));
        let err = submit(&store, ACCOUNT, Some(1), None).await.unwrap_err();
        assert!(matches!(err, CountdownError::Validation(_)));
        let err = submit(&store, ACCOUNT, Some(0), Some(3)).await.unwrap_err();
        assert!(matches!(err, CountdownError::Validation(ref m) if m == "Missing album_id or rating"));
    }

    #[tokio::test]
    async fn test_unknown_album() {
        let store = store_with(&[500]).await;
        let err = submit(&store, ACCOUNT, Some(12345), Some(3)).await.unwrap_err();
        assert!(matches!(err, CountdownError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_is_countdown_ordered_and_scoped() {
        let store = store_with(&[3, 2, 1]).await;
        let other = AccountId::new(2);

        // Rate out of order
        for rank in [1, 3, 2] {
            let id = album_id(&store, rank).await;
            submit(&store, ACCOUNT, Some(id), Some(4)).await.unwrap();
        }
        let id = album_id(&store, 2).await;
        submit(&store, other, Some(id), Some(1)).await.unwrap();

        let ranks: Vec<u16> = list_for_account(&store, ACCOUNT)
            .await
            .unwrap()
            .iter()
            .map(|r| r.album.rank.get())
            .collect();
        assert_eq!(ranks, vec![3, 2, 1]);

        let theirs = list_for_account(&store, other).await.unwrap();
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].score.get(), 1);
    }
}
