//! In-memory feed for tests and replaying captured games.

use anyhow::Result;
use async_trait::async_trait;
use odds_arb_core::{GameQuote, OddsFeed};

use crate::error::FeedError;

/// Serves a fixed list of games, or fails every fetch.
#[derive(Debug, Clone)]
pub struct StaticFeed {
    book_id: String,
    games: Vec<GameQuote>,
    failure: Option<String>,
}

impl StaticFeed {
    #[must_use]
    pub fn new(book_id: impl Into<String>, games: Vec<GameQuote>) -> Self {
        Self {
            book_id: book_id.into(),
            games,
            failure: None,
        }
    }

    /// A feed whose every fetch reports the book as unavailable.
    #[must_use]
    pub fn failing(book_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            book_id: book_id.into(),
            games: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

#[async_trait]
impl OddsFeed for StaticFeed {
    fn book_id(&self) -> &str {
        &self.book_id
    }

    async fn fetch_games(&self) -> Result<Vec<GameQuote>> {
        if let Some(reason) = &self.failure {
            return Err(FeedError::Unavailable {
                book: self.book_id.clone(),
                reason: reason.clone(),
            }
            .into());
        }
        Ok(self.games.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odds_arb_core::OddsQuote;

    #[tokio::test]
    async fn test_static_feed_returns_games() {
        let game = GameQuote::from_scraped_row(
            ["mets".into(), "cubs".into()],
            &[OddsQuote::price(-110), OddsQuote::price(100)],
            1.0,
        );
        let feed = StaticFeed::new("fanduel", vec![game.clone()]);

        assert_eq!(feed.fetch_games().await.unwrap(), vec![game]);
    }

    #[tokio::test]
    async fn test_failing_feed() {
        let feed = StaticFeed::failing("betmgm", "maintenance");
        let err = feed.fetch_games().await.unwrap_err();

        assert_eq!(err.to_string(), "book betmgm unavailable: maintenance");
    }
}
