//! Error taxonomy for the task store.
//!
//! Three failure classes cover every store operation: a validation failure at
//! the create/edit boundary (nothing is written), an underlying SQLite
//! failure (propagated untranslated, no retry), and a schema migration
//! failure at open. Mutations referencing a missing id are deliberately not
//! errors; the store treats them as harmless no-ops.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A field failed validation; the operation aborted with no partial write.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// Underlying SQLite failure.
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),

    /// Schema migration failure while opening the database.
    #[error(transparent)]
    Migration(#[from] refinery::Error),
}

impl StoreError {
    pub fn empty_title() -> Self {
        StoreError::Validation {
            field: "title",
            reason: "must not be empty or whitespace-only".to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
