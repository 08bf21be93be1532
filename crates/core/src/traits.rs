use crate::odds::GameQuote;
use anyhow::Result;
use async_trait::async_trait;

/// A source of live odds for a single sportsbook.
///
/// Each implementation owns whatever session it needs to read its book;
/// callers only see the games it reports for the current cycle.
#[async_trait]
pub trait OddsFeed: Send + Sync {
    /// Stable identifier of the book this feed reads (e.g. `"fanduel"`).
    fn book_id(&self) -> &str;

    /// Reads every game currently listed by the book.
    async fn fetch_games(&self) -> Result<Vec<GameQuote>>;
}
