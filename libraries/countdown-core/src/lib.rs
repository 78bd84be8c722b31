//! Album Countdown Core
//!
//! Storage-agnostic domain layer for the album countdown: a fixed catalog of
//! 500 ranked albums that each account works through from rank 500 down to
//! rank 1, rating albums along the way.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Album`, `Rank`, `Account`, `ProgressRecord`, `Rating`
//! - **Repository Traits**: `AlbumCatalog`, `AccountRepository`,
//!   `ProgressRepository`, `RatingRepository`
//! - **Operations**: catalog lookups and seeding, the progress state machine,
//!   and the rating ledger, all generic over the repository traits
//! - **Error Handling**: Unified `CountdownError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use countdown_core::types::Rank;
//!
//! let start = Rank::START;
//! assert_eq!(start.get(), 500);
//! assert_eq!(start.next().map(Rank::get), Some(499));
//! assert!(Rank::FINAL.next().is_none());
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod progress;
pub mod ratings;
pub mod storage;
pub mod types;

#[cfg(any(test, feature = "memory"))]
pub mod memory;

// Re-export commonly used types
pub use error::{CountdownError, Result};
pub use storage::{AccountRepository, AlbumCatalog, CountdownStore, ProgressRepository, RatingRepository};

pub use types::{
    // Catalog
    Album, AlbumId, AlbumSummary, CreateAlbum, Rank, SeedReport,
    // Accounts
    Account, AccountId, NewAccount, Profile,
    // Progress
    Completion, ProgressRecord, ProgressStatus,
    // Ratings
    RatedAlbum, Rating, Score,
};
