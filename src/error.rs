//! Error types for qix.
//!
//! Two failure classes matter to callers: a chunk that cannot be served at
//! all ([`Error::IndexUnavailable`], fatal at startup) and a posting lookup
//! that cannot be satisfied ([`Error::PostingsUnavailable`], recovered as
//! zero results on the query path). Malformed query text is not an error
//! anywhere in the crate; it resolves to a sentinel result instead.

use std::path::PathBuf;

use thiserror::Error;

/// The error type for chunk and query operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The chunk file is missing or its lexicon region is corrupt.
    ///
    /// Raised only while opening a chunk; a service that hits this cannot
    /// serve any queries and construction fails.
    #[error("index chunk unavailable: {}: {reason}", path.display())]
    IndexUnavailable { path: PathBuf, reason: String },

    /// A posting list could not be read: the term is absent from the
    /// lexicon, or a read ran past the end of the chunk file.
    #[error("postings unavailable for {term:?}: {reason}")]
    PostingsUnavailable { term: String, reason: String },
}

/// Result type alias for chunk and query operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new index-unavailable error.
    pub fn index_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::IndexUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new postings-unavailable error.
    pub fn postings_unavailable(term: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::PostingsUnavailable {
            term: term.into(),
            reason: reason.into(),
        }
    }
}
