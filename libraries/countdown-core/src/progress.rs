//! Progress state machine
//!
//! ```text
//! uninitialized --initialize(r)--> in_progress(r)
//! in_progress(r) --complete--> in_progress(r - 1)     for r > 1
//! in_progress(1) --complete--> in_progress(1)         reports AllCompleted
//! ```
//!
//! Rank 1 is the only completion signal. The number of ratings an account
//! holds plays no part in it.

use crate::error::{CountdownError, Result};
use crate::storage::{AlbumCatalog, ProgressRepository};
use crate::types::{AccountId, Album, Completion, ProgressRecord, ProgressStatus, Rank};

/// Entity name carried by the `NotFound` raised for accounts without progress
pub const ENTITY: &str = "Progress";

async fn load<S>(store: &S, account_id: AccountId) -> Result<(ProgressRecord, Album)>
where
    S: AlbumCatalog + ProgressRepository + ?Sized,
{
    let record = store
        .find_progress(account_id)
        .await?
        .ok_or_else(|| CountdownError::not_found(ENTITY, account_id))?;

    let album = store
        .find_album_by_id(record.current_album_id)
        .await?
        .ok_or_else(|| CountdownError::not_found("Current album", record.current_album_id))?;

    Ok((record, album))
}

/// Where the account currently is.
///
/// `NotFound` means the account has not been onboarded yet.
pub async fn get_current<S>(store: &S, account_id: AccountId) -> Result<ProgressStatus>
where
    S: AlbumCatalog + ProgressRepository + ?Sized,
{
    let (_, album) = load(store, account_id).await?;

    if album.rank.is_final() {
        Ok(ProgressStatus::AllCompleted(album))
    } else {
        Ok(ProgressStatus::InProgress(album))
    }
}

/// Start the countdown at `requested_rank` (rank 500 when `None`).
///
/// Happens exactly once per account. A second call fails with `Conflict`
/// whatever rank it asks for.
pub async fn initialize<S>(
    store: &S,
    account_id: AccountId,
    requested_rank: Option<i64>,
) -> Result<Album>
where
    S: AlbumCatalog + ProgressRepository + ?Sized,
{
    if store.find_progress(account_id).await?.is_some() {
        return Err(CountdownError::conflict("Progress already initialized"));
    }

    let rank = match requested_rank {
        Some(value) => Rank::new(value)?,
        None => Rank::START,
    };

    let album = store
        .find_album_by_rank(rank)
        .await?
        .ok_or_else(|| CountdownError::not_found("Album with rank", rank))?;

    // The unique constraint on account turns a lost race into Conflict here
    store.create_progress(account_id, album.id).await?;

    Ok(album)
}

/// Mark the current album done and move to the next rank.
pub async fn complete_current<S>(store: &S, account_id: AccountId) -> Result<Completion>
where
    S: AlbumCatalog + ProgressRepository + ?Sized,
{
    let (record, current) = load(store, account_id).await?;

    let Some(next_rank) = current.rank.next() else {
        return Ok(Completion::AllCompleted);
    };

    let next = store
        .find_album_by_rank(next_rank)
        .await?
        .ok_or_else(|| CountdownError::not_found("Album with rank", next_rank))?;

    let moved = store
        .advance_progress(account_id, record.current_album_id, next.id)
        .await?;
    if !moved {
        return Err(CountdownError::conflict(
            "Progress was changed by another request, please retry",
        ));
    }

    Ok(Completion::Advanced(next))
}
