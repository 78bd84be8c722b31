use crate::{accounts, albums, progress, ratings};
use async_trait::async_trait;
use countdown_core::{
    error::Result,
    storage::{AccountRepository, AlbumCatalog, ProgressRepository, RatingRepository},
    types::*,
};
use sqlx::SqlitePool;

/// `SQLite`-backed implementation of every repository trait
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl AlbumCatalog for SqliteStore {
    async fn list_albums(&self) -> Result<Vec<Album>> {
        albums::get_all(&self.pool).await
    }

    async fn find_album_by_id(&self, id: AlbumId) -> Result<Option<Album>> {
        albums::get_by_id(&self.pool, id).await
    }

    async fn find_album_by_rank(&self, rank: Rank) -> Result<Option<Album>> {
        albums::get_by_rank(&self.pool, rank).await
    }

    async fn insert_albums(&self, rows: Vec<CreateAlbum>) -> Result<SeedReport> {
        albums::insert_many(&self.pool, rows).await
    }
}

#[async_trait]
impl AccountRepository for SqliteStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        accounts::create(&self.pool, account).await
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>> {
        accounts::get_by_id(&self.pool, id).await
    }

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        accounts::get_by_username(&self.pool, username).await
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        accounts::get_by_email(&self.pool, email).await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        accounts::get_all(&self.pool).await
    }
}

#[async_trait]
impl ProgressRepository for SqliteStore {
    async fn find_progress(&self, account_id: AccountId) -> Result<Option<ProgressRecord>> {
        progress::get(&self.pool, account_id).await
    }

    async fn create_progress(
        &self,
        account_id: AccountId,
        album_id: AlbumId,
    ) -> Result<ProgressRecord> {
        progress::create(&self.pool, account_id, album_id).await
    }

    async fn advance_progress(
        &self,
        account_id: AccountId,
        from: AlbumId,
        to: AlbumId,
    ) -> Result<bool> {
        progress::advance(&self.pool, account_id, from, to).await
    }
}

#[async_trait]
impl RatingRepository for SqliteStore {
    async fn upsert_rating(
        &self,
        account_id: AccountId,
        album_id: AlbumId,
        score: Score,
    ) -> Result<Rating> {
        ratings::upsert(&self.pool, account_id, album_id, score).await
    }

    async fn list_ratings(&self, account_id: AccountId) -> Result<Vec<RatedAlbum>> {
        ratings::get_for_account(&self.pool, account_id).await
    }
}
