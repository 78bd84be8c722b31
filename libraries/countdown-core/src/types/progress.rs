//! Progress types
//!
//! An account's progress is a pointer into the countdown. It moves one rank
//! at a time toward rank 1 and never moves back.

use super::{AccountId, Album, AlbumId};
use chrono::{DateTime, Utc};

/// Progress row as persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub account_id: AccountId,
    pub current_album_id: AlbumId,
    pub updated_at: DateTime<Utc>,
}

/// Answer to "where am I in the countdown?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressStatus {
    /// Working on this album
    InProgress(Album),
    /// Reached rank 1; carries the final album
    AllCompleted(Album),
}

impl ProgressStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::AllCompleted(_))
    }

    pub fn album(&self) -> &Album {
        match self {
            Self::InProgress(album) | Self::AllCompleted(album) => album,
        }
    }
}

/// Result of completing the current album
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Moved on to this album
    Advanced(Album),
    /// Already at rank 1, nothing changed
    AllCompleted,
}

