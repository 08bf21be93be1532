//! Cross-book arbitrage detection for sportsbook odds.
//!
//! This crate turns one [`OddsSnapshot`](odds_arb_core::OddsSnapshot) per
//! refresh cycle into a ranked list of two-leg positions across books.
//!
//! # Overview
//!
//! ```text
//! fanduel:    yankees -150 / red sox +130
//! draftkings: yankees -140 / red sox +120
//!
//! Cross legs for the pair (draftkings, fanduel):
//!   draftkings yankees -140  vs  fanduel red sox +130
//!   draftkings red sox +120  vs  fanduel yankees -150
//! ```
//!
//! Each leg pair is converted to implied probabilities, checked against the
//! trigger margin, and sized against an assumed bankroll.
//!
//! # Modules
//!
//! - [`normalizer`]: Canonical team names
//! - [`matcher`]: Group games across books
//! - [`comparator`]: Enumerate cross-book legs per market
//! - [`calculator`]: Odds conversion, trigger, and stake sizing
//! - [`ranker`]: Order and truncate results
//! - [`detector`]: The full pipeline
//!
//! # Example
//!
//! ```
//! use odds_arb_core::{DetectorConfig, OddsSnapshot};
//! use odds_arb_detector::ArbitrageDetector;
//!
//! let detector = ArbitrageDetector::with_config(DetectorConfig::default());
//! let report = detector.scan(&OddsSnapshot::new());
//!
//! assert!(report.opportunities.is_empty());
//! ```

pub mod calculator;
pub mod comparator;
pub mod detector;
pub mod matcher;
pub mod normalizer;
pub mod ranker;
pub mod types;

// Re-export main types for convenience
pub use calculator::{
    american_to_decimal, implied_probability, kelly_fraction, ArbitrageCalculator, StakePlan,
};
pub use comparator::{LegPair, MarketComparator};
pub use detector::{ArbitrageDetector, DetectionReport, DetectionSummary};
pub use matcher::{game_key, normalized_teams, BookQuote, GameMatcher, MatchedGame};
pub use normalizer::normalize_team_name;
pub use ranker::{OpportunityRanker, DEFAULT_MAX_RESULTS};
pub use types::ArbitrageOpportunity;

#[cfg(test)]
mod tests {
    use super::*;
    use odds_arb_core::AmericanOdds;

    #[test]
    fn test_defaults_agree_across_components() {
        let detector = ArbitrageDetector::new();
        let calculator = ArbitrageCalculator::new();

        assert_eq!(OpportunityRanker::default().max_results(), DEFAULT_MAX_RESULTS);
        assert_eq!(detector.config().max_results, DEFAULT_MAX_RESULTS);
        // -110 / -110 carries 104.76% implied probability, above the default margin
        assert!(calculator.triggers(110.0 / 210.0, 110.0 / 210.0));
        assert!(!calculator.triggers(0.5, 0.5));
    }

    #[test]
    fn test_conversion_helpers_accessible() {
        let odds = AmericanOdds::new(-200).unwrap();
        assert!((american_to_decimal(odds) - 1.5).abs() < 1e-12);
        assert!((implied_probability(odds) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_key_helpers_accessible() {
        assert_eq!(
            game_key(&normalize_team_name("boston red sox"), "yankees"),
            "red sox vs yankees"
        );
    }
}
