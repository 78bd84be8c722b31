//! Rating types

use super::{AccountId, AlbumId, AlbumSummary};
use crate::error::{CountdownError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-5 star score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a score
    pub fn new(value: i64) -> Result<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CountdownError::validation(
                "Rating must be an integer between 1 and 5",
            ))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = CountdownError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        i64::from(score.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rating row. At most one exists per (account, album).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub id: i64,
    #[serde(skip)]
    pub account_id: AccountId,
    pub album_id: AlbumId,
    #[serde(rename = "rating")]
    pub score: Score,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A rating joined with the album it rates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatedAlbum {
    pub id: i64,
    pub album_id: AlbumId,
    #[serde(rename = "rating")]
    pub score: Score,
    pub created_at: DateTime<Utc>,
    pub album: AlbumSummary,
}
