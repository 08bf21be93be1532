//! Builds feeds from configured books.

use std::collections::HashSet;
use std::sync::Arc;

use odds_arb_core::{BookConfig, BookSource, OddsFeed};
use tracing::debug;

use crate::error::{FeedError, Result};
use crate::file::JsonFileFeed;

/// Creates one feed per configured book, in configuration order.
///
/// # Errors
///
/// Returns [`FeedError::DuplicateBook`] if two books share an id.
pub fn build_feeds(books: &[BookConfig]) -> Result<Vec<Arc<dyn OddsFeed>>> {
    let mut seen = HashSet::new();
    let mut feeds: Vec<Arc<dyn OddsFeed>> = Vec::with_capacity(books.len());

    for book in books {
        if !seen.insert(book.id.as_str()) {
            return Err(FeedError::DuplicateBook(book.id.clone()));
        }

        let feed: Arc<dyn OddsFeed> = match &book.source {
            BookSource::JsonFile { path } => {
                debug!(book = %book.id, path = %path.display(), "Registering JSON file feed");
                Arc::new(JsonFileFeed::new(&book.id, path))
            }
        };
        feeds.push(feed);
    }

    Ok(feeds)
}
