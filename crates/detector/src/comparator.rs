//! Cross-book leg enumeration.
//!
//! For a two-way market, a hedge takes outcome 0 at one book and outcome 1
//! at another. Every unordered pair of books yields at most two such legs.

use odds_arb_core::{AmericanOdds, MarketType};
use tracing::trace;

use crate::matcher::MatchedGame;

/// Outcome index combinations compared for each book pair: `(book1, book2)`.
const CROSS_OUTCOMES: [(usize, usize); 2] = [(0, 1), (1, 0)];

/// Two opposing prices on the same market, taken at two different books.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegPair<'a> {
    pub market: MarketType,
    pub book1: &'a str,
    pub book2: &'a str,
    /// Outcome index taken at `book1`.
    pub outcome1: usize,
    /// Outcome index taken at `book2`.
    pub outcome2: usize,
    pub odds1: AmericanOdds,
    pub odds2: AmericanOdds,
}

/// Enumerates candidate leg pairs for one game and market.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketComparator;

impl MarketComparator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns every cross leg with a price on both sides.
    ///
    /// Book pairs follow the game's book order (`i < j`), and each pair is
    /// checked as outcome (0, 1) then (1, 0). Books that did not list the
    /// market are skipped, as is any leg missing a price.
    #[must_use]
    pub fn leg_pairs<'a>(&self, game: &MatchedGame<'a>, market: MarketType) -> Vec<LegPair<'a>> {
        let mut legs = Vec::new();
        let quotes = &game.quotes;

        for (i, first) in quotes.iter().enumerate() {
            for second in &quotes[i + 1..] {
                let (Some(prices1), Some(prices2)) =
                    (first.quote.market(market), second.quote.market(market))
                else {
                    trace!(
                        game = %game.key,
                        market = %market,
                        book1 = first.book,
                        book2 = second.book,
                        "Market not listed by both books"
                    );
                    continue;
                };

                for (outcome1, outcome2) in CROSS_OUTCOMES {
                    let (Some(odds1), Some(odds2)) =
                        (prices1[outcome1].odds(), prices2[outcome2].odds())
                    else {
                        continue;
                    };

                    legs.push(LegPair {
                        market,
                        book1: first.book,
                        book2: second.book,
                        outcome1,
                        outcome2,
                        odds1,
                        odds2,
                    });
                }
            }
        }

        legs
    }
}
