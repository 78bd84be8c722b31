//! Catalog CSV import
//!
//! Reads the countdown source file. Expected header:
//!
//! ```text
//! Rank,Artist,Album,Info,Description
//! ```
//!
//! `Info` and `Description` may be empty or absent.

use crate::StorageError;
use countdown_core::types::{CreateAlbum, Rank};
use serde::Deserialize;
use std::io;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Rank")]
    rank: i64,
    #[serde(rename = "Artist")]
    artist: String,
    #[serde(rename = "Album")]
    album: String,
    #[serde(rename = "Info", default)]
    info: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse catalog rows from any reader
pub fn read_catalog<R: io::Read>(reader: R) -> Result<Vec<CreateAlbum>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut albums = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);

        let row: CatalogRow = record
            .deserialize(Some(&headers))
            .map_err(|e| StorageError::import(line, e.to_string()))?;
        let rank = Rank::new(row.rank).map_err(|e| StorageError::import(line, e.to_string()))?;

        albums.push(CreateAlbum {
            rank,
            artist: row.artist,
            title: row.album,
            info: non_empty(row.info),
            description: non_empty(row.description),
        });
    }

    tracing::debug!(rows = albums.len(), "Parsed catalog source");
    Ok(albums)
}

/// Parse a catalog file from disk
pub fn read_catalog_file(path: impl AsRef<Path>) -> Result<Vec<CreateAlbum>, StorageError> {
    let file = std::fs::File::open(path)?;
    read_catalog(io::BufReader::new(file))
}
