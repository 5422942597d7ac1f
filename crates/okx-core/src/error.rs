//! Error types for okx-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in okx-core
#[derive(Debug, Error)]
pub enum Error {
    /// Config file does not exist
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Config file exists but could not be read
    #[error("failed to read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The expected `[section]` never appeared in the config file
    #[error("section [{section}] not found in config '{}'", .path.display())]
    ConfigSectionMissing { path: PathBuf, section: String },

    /// A required key is missing or empty
    #[error("config '{}' is missing required field '{field}'", .path.display())]
    ConfigMissingField { path: PathBuf, field: String },

    /// Input path cannot be accessed
    #[error("cannot access input path '{}': {source}", .path.display())]
    InputPathUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was given directly but it is not a CSV file
    #[error("input file is not a CSV file: {}", .0.display())]
    UnsupportedInput(PathBuf),

    /// CSV header has no `name` column
    #[error("no 'name' column in CSV header of '{}'", .0.display())]
    MissingNameColumn(PathBuf),

    /// CSV has a header but no data rows
    #[error("CSV '{}' has no data rows", .0.display())]
    NoDataRows(PathBuf),

    /// Failed to read a file
    #[error("failed to read file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV error from the csv crate
    #[error("CSV error in '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Metadata JSON could not be decoded
    #[error("failed to parse JSON '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Failed to list a directory
    #[error("failed to read directory '{}': {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write an output file
    #[error("failed to write '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
