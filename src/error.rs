//! Error types for extraction operations.
//!
//! This module provides the [`ExtractError`] type and the [`Result`] convenience
//! type. Missing tags, missing subfields, blank values, and unmapped codes are
//! never errors: extractors report them as empty results. The variants here
//! cover caller-side construction bugs, lookup-table loading, and the
//! embedded-date boundary where malformed data is caught and logged.

use thiserror::Error;

/// Error type for extraction operations.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A caller supplied arguments that cannot be combined, such as both an
    /// inclusion and an exclusion subfield set.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An extractor key that parsed correctly but has no registered function.
    #[error("Unknown extractor: {0}")]
    UnknownExtractor(String),

    /// An embedded date value that could not be parsed.
    #[error("Malformed date {raw:?}: {reason}")]
    MalformedDate {
        /// The raw value as found in the record
        raw: String,
        /// Why parsing failed
        reason: String,
    },

    /// A code table could not be loaded from its source.
    #[error("Failed to load {table} code table: {reason}")]
    CodeMapLoad {
        /// Name of the table being loaded
        table: String,
        /// Underlying cause
        reason: String,
    },

    /// JSON error while reading a mapping or code table.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading a mapping or code table.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
