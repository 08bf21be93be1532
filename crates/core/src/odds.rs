//! Odds data model shared by ingestion and detection.
//!
//! A refresh cycle produces one [`OddsSnapshot`]: every sportsbook maps its
//! game keys to a [`GameQuote`], and every quote carries up to three two-way
//! markets priced in American odds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroI32;

// =============================================================================
// American Odds
// =============================================================================

/// A validated American price. Zero is not a price and cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AmericanOdds(NonZeroI32);

impl AmericanOdds {
    /// Wraps a raw American price, rejecting zero.
    #[must_use]
    pub fn new(value: i32) -> Option<Self> {
        NonZeroI32::new(value).map(Self)
    }

    /// Returns the raw American value (e.g. `-110`, `+150`).
    #[must_use]
    pub fn value(self) -> i32 {
        self.0.get()
    }

    /// Converts to a decimal payout factor (stake included).
    ///
    /// ```text
    /// +odds:  1 + odds / 100
    /// -odds:  1 + 100 / |odds|
    /// ```
    #[must_use]
    pub fn to_decimal(self) -> f64 {
        let odds = f64::from(self.value());
        if odds > 0.0 {
            1.0 + odds / 100.0
        } else {
            1.0 + 100.0 / odds.abs()
        }
    }

    /// Break-even probability encoded by the price, always in `(0, 1)`.
    #[must_use]
    pub fn implied_probability(self) -> f64 {
        1.0 / self.to_decimal()
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "american odds cannot be zero".to_string())
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.value()
    }
}

impl std::fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value() > 0 {
            write!(f, "+{}", self.value())
        } else {
            write!(f, "{}", self.value())
        }
    }
}

// =============================================================================
// Quotes
// =============================================================================

/// One posted price, or nothing if the book's text could not be parsed.
///
/// Serialized as an integer or `null`. A zero on the wire is read as an
/// empty quote so it never reaches the odds conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i32>", into = "Option<i32>")]
pub struct OddsQuote(Option<AmericanOdds>);

impl OddsQuote {
    /// A quote with no usable price.
    pub const EMPTY: Self = Self(None);

    /// Builds a quote from an optional raw value; zero becomes empty.
    #[must_use]
    pub fn new(value: Option<i32>) -> Self {
        Self(value.and_then(AmericanOdds::new))
    }

    /// Builds a quote holding a price.
    #[must_use]
    pub fn price(value: i32) -> Self {
        Self::new(Some(value))
    }

    /// Returns the validated price, if any.
    #[must_use]
    pub fn odds(self) -> Option<AmericanOdds> {
        self.0
    }

    /// Returns the raw American value, if any.
    #[must_use]
    pub fn value(self) -> Option<i32> {
        self.0.map(AmericanOdds::value)
    }

    /// Returns true if there is no usable price.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<i32>> for OddsQuote {
    fn from(value: Option<i32>) -> Self {
        Self::new(value)
    }
}

impl From<OddsQuote> for Option<i32> {
    fn from(quote: OddsQuote) -> Self {
        quote.value()
    }
}

/// Outcome 0 and outcome 1 of a two-way market, in the order the book lists them.
pub type TwoWayMarket = [OddsQuote; 2];

// =============================================================================
// Market Types
// =============================================================================

/// The markets compared for every game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Moneyline,
    Spread,
    Total,
}

impl MarketType {
    /// Every market, in comparison order.
    pub const ALL: [Self; 3] = [Self::Moneyline, Self::Spread, Self::Total];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moneyline => "moneyline",
            Self::Spread => "spread",
            Self::Total => "total",
        }
    }
}

impl std::fmt::Display for MarketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Game Quote
// =============================================================================

/// One book's view of one game at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameQuote {
    /// Team labels in the order the book lists them.
    pub teams: [String; 2],
    /// Moneyline prices, `None` if the book did not list the market.
    #[serde(default)]
    pub moneyline: Option<TwoWayMarket>,
    /// Spread prices.
    #[serde(default)]
    pub spread: Option<TwoWayMarket>,
    /// Total (over/under) prices.
    #[serde(default)]
    pub total: Option<TwoWayMarket>,
    /// Capture time in seconds since the Unix epoch.
    pub timestamp: f64,
}

impl GameQuote {
    /// Creates a quote with every market present.
    #[must_use]
    pub fn new(
        teams: [String; 2],
        moneyline: TwoWayMarket,
        spread: TwoWayMarket,
        total: TwoWayMarket,
        timestamp: f64,
    ) -> Self {
        Self {
            teams,
            moneyline: Some(moneyline),
            spread: Some(spread),
            total: Some(total),
            timestamp,
        }
    }

    /// Builds a quote from a scraped row of prices.
    ///
    /// Only the first six prices are used: moneyline `[0..2]`, spread
    /// `[2..4]`, total `[4..6]`. A market with a single price gets an empty
    /// second outcome; a market with none is absent.
    #[must_use]
    pub fn from_scraped_row(teams: [String; 2], odds: &[OddsQuote], timestamp: f64) -> Self {
        let market = |start: usize| -> Option<TwoWayMarket> {
            let slice = odds.get(start..odds.len().min(start + 2))?;
            match slice {
                [] => None,
                [first] => Some([*first, OddsQuote::EMPTY]),
                [first, second, ..] => Some([*first, *second]),
            }
        };

        Self {
            teams,
            moneyline: market(0),
            spread: market(2),
            total: market(4),
            timestamp,
        }
    }

    /// Returns the prices for one market, if the book listed it.
    #[must_use]
    pub fn market(&self, market: MarketType) -> Option<&TwoWayMarket> {
        match market {
            MarketType::Moneyline => self.moneyline.as_ref(),
            MarketType::Spread => self.spread.as_ref(),
            MarketType::Total => self.total.as_ref(),
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Games reported by one book, keyed by the book's game key.
pub type BookGames = BTreeMap<String, GameQuote>;

/// Every book's games for a single refresh cycle.
///
/// Books iterate in id order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OddsSnapshot {
    pub books: BTreeMap<String, BookGames>,
}

impl OddsSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one book's games.
    pub fn insert_book(&mut self, book_id: impl Into<String>, games: BookGames) {
        self.books.insert(book_id.into(), games);
    }

    /// Number of books that reported anything this cycle.
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Total game records across all books.
    #[must_use]
    pub fn game_count(&self) -> usize {
        self.books.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.game_count() == 0
    }
}

/// Converts a wall-clock time to float seconds since the Unix epoch.
#[must_use]
pub fn unix_timestamp(now: DateTime<Utc>) -> f64 {
    now.timestamp_micros() as f64 / 1_000_000.0
}
