//! Concurrent snapshot collection across sportsbooks.
//!
//! Every feed is read in its own task. Tasks only produce their own book's
//! games; the snapshot is assembled after all of them have finished, so no
//! shared map is written concurrently.

use std::sync::Arc;

use odds_arb_core::{BookGames, GameQuote, OddsFeed, OddsSnapshot};
use odds_arb_detector::{game_key, normalized_teams};
use tracing::{debug, info, warn};

/// Reads every configured book once per cycle.
#[derive(Clone, Default)]
pub struct SnapshotCollector {
    feeds: Vec<Arc<dyn OddsFeed>>,
}

impl SnapshotCollector {
    #[must_use]
    pub fn new(feeds: Vec<Arc<dyn OddsFeed>>) -> Self {
        Self { feeds }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Book ids in feed order.
    #[must_use]
    pub fn book_ids(&self) -> Vec<&str> {
        self.feeds.iter().map(|f| f.book_id()).collect()
    }

    /// Fetches all books concurrently and assembles a snapshot.
    ///
    /// A book whose fetch fails (or whose task panics) is logged and left
    /// out of the snapshot; the other books are unaffected.
    pub async fn collect(&self) -> OddsSnapshot {
        let mut handles = Vec::with_capacity(self.feeds.len());

        for feed in &self.feeds {
            let feed = Arc::clone(feed);
            let handle = tokio::spawn(async move {
                let result = feed.fetch_games().await;
                (feed.book_id().to_string(), result)
            });
            handles.push(handle);
        }

        let results = futures_util::future::join_all(handles).await;

        let mut snapshot = OddsSnapshot::new();
        for (index, joined) in results.into_iter().enumerate() {
            match joined {
                Ok((book, Ok(games))) => {
                    let games = index_games(&book, games);
                    debug!(book = %book, games = games.len(), "Book collected");
                    snapshot.insert_book(book, games);
                }
                Ok((book, Err(e))) => {
                    warn!(book = %book, error = %e, "Failed to fetch book, skipping");
                }
                Err(e) => {
                    let book = self.feeds[index].book_id();
                    warn!(book = %book, error = %e, "Feed task failed, skipping");
                }
            }
        }

        info!(
            books = snapshot.book_count(),
            configured = self.feeds.len(),
            games = snapshot.game_count(),
            "Snapshot collected"
        );

        snapshot
    }
}

impl std::fmt::Debug for SnapshotCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCollector")
            .field("books", &self.book_ids())
            .finish()
    }
}

/// Keys a book's games by canonical game key. When two records normalize
/// to the same key, the later one replaces the earlier.
#[must_use]
pub fn index_games(book: &str, games: Vec<GameQuote>) -> BookGames {
    let mut indexed = BookGames::new();

    for quote in games {
        let teams = normalized_teams(&quote);
        let key = game_key(&teams[0], &teams[1]);

        if indexed.contains_key(&key) {
            debug!(book = %book, game = %key, "Duplicate game in feed, keeping latest");
        }
        indexed.insert(key, quote);
    }

    indexed
}
