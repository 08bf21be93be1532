//! Error types for odds feeds.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a sportsbook feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed's source could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The feed's source was read but is not a valid page dump.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two configured books share an id.
    #[error("duplicate book id: {0}")]
    DuplicateBook(String),

    /// The book could not be read this cycle.
    #[error("book {book} unavailable: {reason}")]
    Unavailable { book: String, reason: String },
}

/// Convenience result alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
