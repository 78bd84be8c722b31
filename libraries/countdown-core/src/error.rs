/// Core error types for Album Countdown
use thiserror::Error;

/// Result type alias using `CountdownError`
pub type Result<T> = std::result::Result<T, CountdownError>;

/// Core error type for Album Countdown
#[derive(Error, Debug)]
pub enum CountdownError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation or an operation that may only happen once
    #[error("{0}")]
    Conflict(String),

    /// Unknown account or wrong password
    #[error("{0}")]
    Auth(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl CountdownError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True if this is a `NotFound` for the given entity
    pub fn is_not_found(&self, entity: &str) -> bool {
        matches!(self, Self::NotFound { entity: e, .. } if e == entity)
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for CountdownError {
    fn from(err: sqlx::Error) -> Self {
        // Unique constraints are the backstop against racing inserts
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::Conflict(db_err.message().to_string());
            }
        }
        Self::Database(err.to_string())
    }
}
