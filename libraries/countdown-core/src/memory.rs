//! In-memory store
//!
//! Implements every repository trait over a mutex-guarded set of maps. Each
//! trait method takes the lock once, so the same atomicity the SQLite store
//! gets from single statements holds here too.

use crate::error::{CountdownError, Result};
use crate::storage::{AccountRepository, AlbumCatalog, ProgressRepository, RatingRepository};
use crate::types::{
    Account, AccountId, Album, AlbumId, CreateAlbum, NewAccount, ProgressRecord, Rank, RatedAlbum,
    Rating, Score, SeedReport,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    albums: BTreeMap<AlbumId, Album>,
    accounts: BTreeMap<AccountId, Account>,
    progress: HashMap<AccountId, ProgressRecord>,
    ratings: HashMap<(AccountId, AlbumId), Rating>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| CountdownError::storage("memory store lock poisoned"))
    }
}

#[async_trait]
impl AlbumCatalog for MemoryStore {
    async fn list_albums(&self) -> Result<Vec<Album>> {
        let inner = self.lock()?;
        let mut albums: Vec<Album> = inner.albums.values().cloned().collect();
        albums.sort_by(|a, b| b.rank.cmp(&a.rank));
        Ok(albums)
    }

    async fn find_album_by_id(&self, id: AlbumId) -> Result<Option<Album>> {
        Ok(self.lock()?.albums.get(&id).cloned())
    }

    async fn find_album_by_rank(&self, rank: Rank) -> Result<Option<Album>> {
        Ok(self
            .lock()?
            .albums
            .values()
            .find(|album| album.rank == rank)
            .cloned())
    }

    async fn insert_albums(&self, albums: Vec<CreateAlbum>) -> Result<SeedReport> {
        let mut inner = self.lock()?;
        let mut report = SeedReport::default();

        for album in albums {
            if inner.albums.values().any(|a| a.rank == album.rank) {
                report.skipped += 1;
                continue;
            }
            let id = AlbumId::new(inner.next_id());
            inner.albums.insert(
                id,
                Album {
                    id,
                    rank: album.rank,
                    artist: album.artist,
                    title: album.title,
                    info: album.info,
                    description: album.description,
                },
            );
            report.inserted += 1;
        }

        Ok(report)
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        let mut inner = self.lock()?;

        if inner.accounts.values().any(|a| a.username == account.username) {
            return Err(CountdownError::conflict("Username already exists"));
        }
        if inner.accounts.values().any(|a| a.email == account.email) {
            return Err(CountdownError::conflict("Email already exists"));
        }

        let id = AccountId::new(inner.next_id());
        let created = Account {
            id,
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        };
        inner.accounts.insert(id, created.clone());
        Ok(created)
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.lock()?.accounts.get(&id).cloned())
    }

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self
            .lock()?
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self
            .lock()?
            .accounts
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut accounts: Vec<Account> = self.lock()?.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(accounts)
    }
}

#[async_trait]
impl ProgressRepository for MemoryStore {
    async fn find_progress(&self, account_id: AccountId) -> Result<Option<ProgressRecord>> {
        Ok(self.lock()?.progress.get(&account_id).cloned())
    }

    async fn create_progress(
        &self,
        account_id: AccountId,
        album_id: AlbumId,
    ) -> Result<ProgressRecord> {
        let mut inner = self.lock()?;
        if inner.progress.contains_key(&account_id) {
            return Err(CountdownError::conflict("Progress already initialized"));
        }
        let record = ProgressRecord {
            account_id,
            current_album_id: album_id,
            updated_at: Utc::now(),
        };
        inner.progress.insert(account_id, record.clone());
        Ok(record)
    }

    async fn advance_progress(
        &self,
        account_id: AccountId,
        from: AlbumId,
        to: AlbumId,
    ) -> Result<bool> {
        let mut inner = self.lock()?;
        match inner.progress.get_mut(&account_id) {
            Some(record) if record.current_album_id == from => {
                record.current_album_id = to;
                record.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl RatingRepository for MemoryStore {
    async fn upsert_rating(
        &self,
        account_id: AccountId,
        album_id: AlbumId,
        score: Score,
    ) -> Result<Rating> {
        let mut inner = self.lock()?;
        let now = Utc::now();

        if let Some(existing) = inner.ratings.get_mut(&(account_id, album_id)) {
            existing.score = score;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let rating = Rating {
            id: inner.next_id(),
            account_id,
            album_id,
            score,
            created_at: now,
            updated_at: now,
        };
        inner.ratings.insert((account_id, album_id), rating.clone());
        Ok(rating)
    }

    async fn list_ratings(&self, account_id: AccountId) -> Result<Vec<RatedAlbum>> {
        let inner = self.lock()?;
        let mut rated: Vec<RatedAlbum> = inner
            .ratings
            .values()
            .filter(|r| r.account_id == account_id)
            .filter_map(|r| {
                let album = inner.albums.get(&r.album_id)?;
                Some(RatedAlbum {
                    id: r.id,
                    album_id: r.album_id,
                    score: r.score,
                    created_at: r.created_at,
                    album: album.summary(),
                })
            })
            .collect();
        rated.sort_by(|a, b| b.album.rank.cmp(&a.album.rank));
        Ok(rated)
    }
}
