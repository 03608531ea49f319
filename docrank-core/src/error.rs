//! Error types and result types for relevancy search operations.
//!
//! This module provides error handling for spec parsing, scoring, and candidate
//! retrieval. Use [`SearchResult<T>`] as the return type for fallible operations.

use regex::Error as RegexError;
use thiserror::Error;

/// Represents all possible errors that can occur during a relevancy search.
///
/// Absent document fields and unrecognized clause shapes are deliberately
/// *not* errors: both score zero (see the evaluator module). An error here
/// means the specification itself is malformed or the candidate source failed.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A `$regex` clause failed to compile. This aborts the whole search call,
    /// since the pattern is part of the specification rather than any document.
    #[error("Pattern compilation error: {0}")]
    PatternCompilation(String),
    /// A literal filter document could not be parsed into a search spec
    /// (e.g. a `$or` whose value is not an array of documents).
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    /// A candidate returned by the source was not a BSON document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// A document with the given ID already exists in the collection.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document {0} already exists in collection {1}")]
    DocumentAlreadyExists(String, String),
    /// The requested document was not found in the collection.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document not found {0} in collection {1}")]
    DocumentNotFound(String, String),
    /// The requested collection does not exist in the candidate source.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    /// An error occurred in the underlying candidate source.
    #[error("Source error: {0}")]
    Source(String),
}

/// A specialized `Result` type for relevancy search operations.
///
/// This type alias is used throughout the crate to indicate operations that may fail
/// with a [`SearchError`].
pub type SearchResult<T> = Result<T, SearchError>;

impl From<RegexError> for SearchError {
    fn from(err: RegexError) -> Self {
        SearchError::PatternCompilation(err.to_string())
    }
}
