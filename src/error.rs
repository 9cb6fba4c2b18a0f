// ⚠️ Error types for loading directories and configuration
//
// Lookups themselves never fail: every query maps to a LookupResult.
// These errors cover the infrastructure around it (files, SQLite, config).

use thiserror::Error;

/// Main error type for account-finder
#[derive(Error, Debug)]
pub enum FinderError {
    /// IO errors (reading CSV files, opening databases)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// SQLite errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Two records share the same normalized (identifier, name) key
    #[error("Duplicate record: identifier {identifier:?} with name {name:?}")]
    DuplicateRecord { identifier: String, name: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} = {value}")]
    Config { field: String, value: String },
}

pub type FinderResult<T> = Result<T, FinderError>;
