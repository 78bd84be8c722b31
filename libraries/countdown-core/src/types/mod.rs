/// Core domain types
pub mod account;
pub mod album;
pub mod ids;
pub mod progress;
pub mod rating;

pub use account::{Account, NewAccount, Profile};
pub use album::{Album, AlbumSummary, CreateAlbum, Rank, SeedReport};
pub use ids::{AccountId, AlbumId};
pub use progress::{Completion, ProgressRecord, ProgressStatus};
pub use rating::{RatedAlbum, Rating, Score};
