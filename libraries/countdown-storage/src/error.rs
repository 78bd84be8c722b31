/// Storage-specific errors
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Catalog source could not be parsed
    #[error("Catalog import error at line {line}: {message}")]
    Import { line: u64, message: String },

    /// CSV reader error
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub(crate) fn import(line: u64, message: impl Into<String>) -> Self {
        Self::Import {
            line,
            message: message.into(),
        }
    }
}

impl From<StorageError> for countdown_core::CountdownError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Database(e) => e.into(),
            StorageError::Import { .. } => countdown_core::CountdownError::validation(err.to_string()),
            other => countdown_core::CountdownError::storage(other.to_string()),
        }
    }
}
