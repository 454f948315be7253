//! Error types for the data-loader crate.
//!
//! Only structural problems are errors here. Missing optional fields
//! (overview, cast, genre ids) are defaulted during parsing instead.

use thiserror::Error;

/// Errors that can occur while loading a catalog or genre table
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The JSON document is malformed, or an item lacks a required field
    /// such as `id`
    #[error("JSON error in {file}: {source}")]
    JsonError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
