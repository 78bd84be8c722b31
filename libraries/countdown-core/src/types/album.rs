//! Album and rank types

use super::AlbumId;
use crate::error::{CountdownError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an album in the countdown, always within `1..=500`.
///
/// The countdown runs from [`Rank::START`] down to [`Rank::FINAL`]; completing
/// an album moves an account to `rank - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rank(u16);

impl Rank {
    /// Number of albums in the countdown
    pub const COUNT: u16 = 500;

    /// Where a new account starts by default
    pub const START: Rank = Rank(Self::COUNT);

    /// The terminal album
    pub const FINAL: Rank = Rank(1);

    /// Validate a rank
    pub fn new(value: i64) -> Result<Self> {
        if (1..=i64::from(Self::COUNT)).contains(&value) {
            Ok(Self(value as u16))
        } else {
            Err(CountdownError::validation(format!(
                "Invalid album rank. Must be between 1 and {}",
                Self::COUNT
            )))
        }
    }

    /// Get the inner value
    pub const fn get(self) -> u16 {
        self.0
    }

    /// True for the last album of the countdown
    pub const fn is_final(self) -> bool {
        self.0 == 1
    }

    /// The rank that follows this one in countdown order, if any
    pub fn next(self) -> Option<Rank> {
        (self.0 > 1).then(|| Rank(self.0 - 1))
    }
}

impl TryFrom<i64> for Rank {
    type Error = CountdownError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rank> for i64 {
    fn from(rank: Rank) -> Self {
        i64::from(rank.0)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An album in the countdown catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub rank: Rank,
    pub artist: String,
    #[serde(rename = "album")]
    pub title: String,
    pub info: Option<String>,
    pub description: Option<String>,
}

impl Album {
    pub fn summary(&self) -> AlbumSummary {
        AlbumSummary {
            id: self.id,
            rank: self.rank,
            artist: self.artist.clone(),
            title: self.title.clone(),
        }
    }
}

/// Album fields included alongside a rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub id: AlbumId,
    pub rank: Rank,
    pub artist: String,
    #[serde(rename = "album")]
    pub title: String,
}

/// Data for seeding a catalog row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub rank: Rank,
    pub artist: String,
    pub title: String,
    pub info: Option<String>,
    pub description: Option<String>,
}

/// Outcome of a catalog seed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Rows written
    pub inserted: usize,
    /// Rows whose rank was already present
    pub skipped: usize,
}
