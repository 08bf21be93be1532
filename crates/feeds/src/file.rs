//! Feed backed by a JSON dump of a sportsbook's live page.
//!
//! The dump holds the raw text captured from the page, one row per game:
//!
//! ```json
//! { "games": [ { "teams": ["New York Yankees", "Boston Red Sox"],
//!                "odds": ["-150", "+130", "-110", "−110", "-105", "-115"] } ] }
//! ```
//!
//! The file is re-read on every fetch, so an external capture process can
//! overwrite it between cycles.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use odds_arb_core::{unix_timestamp, GameQuote, OddsFeed, OddsQuote};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::FeedError;
use crate::parse::{parse_american_odds, parse_team_name};

/// A captured page: every game row the book showed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageDump {
    #[serde(default)]
    pub games: Vec<ScrapedRow>,
}

/// Raw text of one game row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedRow {
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub odds: Vec<String>,
}

impl ScrapedRow {
    /// Converts the row to a quote; `None` if fewer than two teams were captured.
    #[must_use]
    pub fn to_quote(&self, timestamp: f64) -> Option<GameQuote> {
        let [first, second, ..] = self.teams.as_slice() else {
            return None;
        };
        let teams = [parse_team_name(first), parse_team_name(second)];
        let odds: Vec<OddsQuote> = self.odds.iter().map(|t| parse_american_odds(t)).collect();

        Some(GameQuote::from_scraped_row(teams, &odds, timestamp))
    }
}

/// Reads one book's games from a JSON page dump.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    book_id: String,
    path: PathBuf,
}

impl JsonFileFeed {
    #[must_use]
    pub fn new(book_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            book_id: book_id.into(),
            path: path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the dump.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a page dump.
    pub async fn read_dump(&self) -> Result<PageDump, FeedError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FeedError::Io {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&text).map_err(|source| FeedError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl OddsFeed for JsonFileFeed {
    fn book_id(&self) -> &str {
        &self.book_id
    }

    async fn fetch_games(&self) -> Result<Vec<GameQuote>> {
        let dump = self.read_dump().await?;
        let timestamp = unix_timestamp(Utc::now());

        let games: Vec<GameQuote> = dump
            .games
            .iter()
            .enumerate()
            .filter_map(|(row, scraped)| {
                let quote = scraped.to_quote(timestamp);
                if quote.is_none() {
                    debug!(book = %self.book_id, row, "Skipping row without two teams");
                }
                quote
            })
            .collect();

        debug!(
            book = %self.book_id,
            rows = dump.games.len(),
            games = games.len(),
            "Read page dump"
        );

        Ok(games)
    }
}
