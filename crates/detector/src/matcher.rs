//! Game matching across sportsbooks.
//!
//! Every book lists its own games under its own labels. A game is matched
//! across books when the normalized team names compose the same key,
//! `"{team1} vs {team2}"`, in the order each book lists the teams.

use odds_arb_core::{GameQuote, OddsSnapshot};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::normalizer::normalize_team_name;

/// Minimum number of books that must list a game before it is compared.
pub const MIN_BOOKS_PER_GAME: usize = 2;

/// Composes the canonical key for two normalized team names.
#[must_use]
pub fn game_key(team1: &str, team2: &str) -> String {
    format!("{team1} vs {team2}")
}

/// Normalizes both raw team labels of a quote, preserving their order.
#[must_use]
pub fn normalized_teams(quote: &GameQuote) -> [String; 2] {
    [
        normalize_team_name(&quote.teams[0].to_lowercase()),
        normalize_team_name(&quote.teams[1].to_lowercase()),
    ]
}

/// One book's quote for a matched game.
#[derive(Debug, Clone, Copy)]
pub struct BookQuote<'a> {
    pub book: &'a str,
    pub quote: &'a GameQuote,
}

/// A game as reported by every book that lists it.
#[derive(Debug, Clone)]
pub struct MatchedGame<'a> {
    /// Canonical key, e.g. `"yankees vs red sox"`.
    pub key: String,
    /// Normalized team names in key order.
    pub teams: [String; 2],
    /// Quotes in book id order, at most one per book.
    pub quotes: Vec<BookQuote<'a>>,
}

impl MatchedGame<'_> {
    /// Number of books reporting this game.
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if enough books report the game to compare prices.
    #[must_use]
    pub fn is_comparable(&self) -> bool {
        self.book_count() >= MIN_BOOKS_PER_GAME
    }
}

/// Groups per-book game records under canonical keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameMatcher;

impl GameMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Groups every game in the snapshot by canonical key, regardless of how
    /// many books list it. Groups are ordered by key.
    ///
    /// If a book lists two records that normalize to the same key, the last
    /// one (in the book's own key order) is kept.
    #[must_use]
    pub fn group_games<'a>(&self, snapshot: &'a OddsSnapshot) -> Vec<MatchedGame<'a>> {
        let mut groups: BTreeMap<String, MatchedGame<'a>> = BTreeMap::new();

        for (book, games) in &snapshot.books {
            for (book_key, quote) in games {
                let teams = normalized_teams(quote);
                let key = game_key(&teams[0], &teams[1]);

                let group = groups.entry(key.clone()).or_insert_with(|| MatchedGame {
                    key,
                    teams,
                    quotes: Vec::new(),
                });

                let entry = BookQuote {
                    book: book.as_str(),
                    quote,
                };

                if let Some(existing) = group.quotes.iter_mut().find(|q| q.book == book.as_str()) {
                    debug!(
                        book = %book,
                        book_key = %book_key,
                        game = %group.key,
                        "Duplicate game record for book, keeping latest"
                    );
                    *existing = entry;
                    continue;
                }

                group.quotes.push(entry);
            }
        }

        groups.into_values().collect()
    }

    /// Returns only the games listed by at least two books.
    #[must_use]
    pub fn match_games<'a>(&self, snapshot: &'a OddsSnapshot) -> Vec<MatchedGame<'a>> {
        self.group_games(snapshot)
            .into_iter()
            .filter(|game| {
                let comparable = game.is_comparable();
                if !comparable {
                    trace!(game = %game.key, books = game.book_count(), "Game listed by too few books");
                }
                comparable
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odds_arb_core::{BookGames, OddsQuote};

    fn quote(team1: &str, team2: &str, ml: [i32; 2]) -> GameQuote {
        GameQuote::new(
            [team1.to_string(), team2.to_string()],
            [OddsQuote::price(ml[0]), OddsQuote::price(ml[1])],
            [OddsQuote::EMPTY, OddsQuote::EMPTY],
            [OddsQuote::EMPTY, OddsQuote::EMPTY],
            0.0,
        )
    }

    fn book(games: &[(&str, GameQuote)]) -> BookGames {
        games
            .iter()
            .map(|(key, quote)| ((*key).to_string(), quote.clone()))
            .collect()
    }

    #[test]
    fn test_game_key_format() {
        assert_eq!(game_key("yankees", "red sox"), "yankees vs red sox");
    }

    #[test]
    fn test_normalized_teams_lowercases() {
        let q = quote("New York Yankees", "Boston Red Sox", [-150, 130]);
        assert_eq!(normalized_teams(&q), ["yankees".to_string(), "red sox".to_string()]);
    }

    #[test]
    fn test_matches_across_different_labels() {
        let mut snapshot = OddsSnapshot::new();
        snapshot.insert_book(
            "fanduel",
            book(&[("a", quote("new york yankees", "boston red sox", [-150, 130]))]),
        );
        snapshot.insert_book(
            "draftkings",
            book(&[("b", quote("NY Yankees", "Red Sox", [-145, 125]))]),
        );

        let matched = GameMatcher::new().match_games(&snapshot);

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].key, "yankees vs red sox");
        assert_eq!(matched[0].book_count(), 2);
        let books: Vec<&str> = matched[0].quotes.iter().map(|q| q.book).collect();
        assert_eq!(books, vec!["draftkings", "fanduel"]);
    }

    #[test]
    fn test_single_book_game_dropped() {
        let mut snapshot = OddsSnapshot::new();
        snapshot.insert_book("fanduel", book(&[("a", quote("mets", "cubs", [-110, -110]))]));
        snapshot.insert_book("betmgm", book(&[("b", quote("astros", "rangers", [-110, -110]))]));

        let matcher = GameMatcher::new();
        assert_eq!(matcher.group_games(&snapshot).len(), 2);
        assert!(matcher.match_games(&snapshot).is_empty());
    }

    #[test]
    fn test_team_order_is_significant() {
        let mut snapshot = OddsSnapshot::new();
        snapshot.insert_book("fanduel", book(&[("a", quote("mets", "cubs", [-110, -110]))]));
        snapshot.insert_book("betmgm", book(&[("a", quote("cubs", "mets", [-110, -110]))]));

        let groups = GameMatcher::new().group_games(&snapshot);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();

        assert_eq!(keys, vec!["cubs vs mets", "mets vs cubs"]);
        assert!(GameMatcher::new().match_games(&snapshot).is_empty());
    }

    #[test]
    fn test_duplicate_record_in_one_book_keeps_last() {
        let mut snapshot = OddsSnapshot::new();
        snapshot.insert_book(
            "fanduel",
            book(&[
                ("1", quote("new york mets", "chicago cubs", [-120, 100])),
                ("2", quote("mets", "cubs", [-999, 999])),
            ]),
        );

        let groups = GameMatcher::new().group_games(&snapshot);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].book_count(), 1);
        assert_eq!(
            groups[0].quotes[0].quote.moneyline.unwrap()[0],
            OddsQuote::price(-999)
        );
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(GameMatcher::new().match_games(&OddsSnapshot::new()).is_empty());
    }
}
