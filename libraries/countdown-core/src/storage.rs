//! Repository traits
//!
//! Each entity gets its own repository. Implementations own their storage
//! handle; nothing here relies on ambient state, so the operations in
//! [`crate::catalog`], [`crate::progress`] and [`crate::ratings`] run the same
//! against SQLite or the in-memory store.

use crate::error::Result;
use crate::types::{
    Account, AccountId, Album, AlbumId, CreateAlbum, NewAccount, ProgressRecord, Rank, RatedAlbum,
    Rating, Score, SeedReport,
};
use async_trait::async_trait;

/// Read access to the album catalog, plus the bulk seed
#[async_trait]
pub trait AlbumCatalog: Send + Sync {
    /// All albums, highest rank number first
    async fn list_albums(&self) -> Result<Vec<Album>>;

    async fn find_album_by_id(&self, id: AlbumId) -> Result<Option<Album>>;

    async fn find_album_by_rank(&self, rank: Rank) -> Result<Option<Album>>;

    /// Insert rows atomically, skipping ranks that already exist
    async fn insert_albums(&self, albums: Vec<CreateAlbum>) -> Result<SeedReport>;
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create an account. Fails with `Conflict` if username or email is taken.
    async fn create_account(&self, account: NewAccount) -> Result<Account>;

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>>;

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn list_accounts(&self) -> Result<Vec<Account>>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn find_progress(&self, account_id: AccountId) -> Result<Option<ProgressRecord>>;

    /// Create the progress row. Fails with `Conflict` if one exists.
    async fn create_progress(
        &self,
        account_id: AccountId,
        album_id: AlbumId,
    ) -> Result<ProgressRecord>;

    /// Move the pointer from `from` to `to` if it still points at `from`.
    ///
    /// Returns `false` when another request moved it first.
    async fn advance_progress(
        &self,
        account_id: AccountId,
        from: AlbumId,
        to: AlbumId,
    ) -> Result<bool>;
}

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert the rating, or overwrite the score of the existing one
    async fn upsert_rating(
        &self,
        account_id: AccountId,
        album_id: AlbumId,
        score: Score,
    ) -> Result<Rating>;

    /// Ratings joined with their albums, highest rank number first
    async fn list_ratings(&self, account_id: AccountId) -> Result<Vec<RatedAlbum>>;
}

/// Everything the HTTP layer needs from one storage handle
pub trait CountdownStore:
    AlbumCatalog + AccountRepository + ProgressRepository + RatingRepository
{
}

impl<T> CountdownStore for T where
    T: AlbumCatalog + AccountRepository + ProgressRepository + RatingRepository
{
}
