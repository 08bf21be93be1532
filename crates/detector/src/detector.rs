//! Snapshot-level arbitrage detection.
//!
//! Runs the full pipeline for one refresh cycle: match games across books,
//! enumerate cross-book legs per market, evaluate each leg pair, then rank.
//! Detection is synchronous, performs no I/O, and keeps no state between
//! calls, so one detector can serve any number of snapshots concurrently.

use chrono::Utc;
use odds_arb_core::{unix_timestamp, DetectorConfig, MarketType, OddsSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculator::ArbitrageCalculator;
use crate::comparator::MarketComparator;
use crate::matcher::GameMatcher;
use crate::ranker::OpportunityRanker;
use crate::types::ArbitrageOpportunity;

// =============================================================================
// Detection Result
// =============================================================================

/// Counters for one detection pass, for monitoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    /// Books present in the snapshot.
    pub books: usize,
    /// Distinct canonical games across all books.
    pub games_seen: usize,
    /// Games listed by at least two books.
    pub games_matched: usize,
    /// Cross-book leg pairs evaluated against the trigger.
    pub leg_pairs_evaluated: usize,
    /// Records produced before ranking truncation.
    pub opportunities_found: usize,
    /// Best ROI among the produced records.
    pub best_roi: Option<f64>,
}

/// Ranked opportunities plus the counters that produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub opportunities: Vec<ArbitrageOpportunity>,
    pub summary: DetectionSummary,
}

// =============================================================================
// Detector
// =============================================================================

/// Finds and ranks cross-book opportunities in an odds snapshot.
#[derive(Debug, Clone)]
pub struct ArbitrageDetector {
    config: DetectorConfig,
    matcher: GameMatcher,
    comparator: MarketComparator,
    calculator: ArbitrageCalculator,
    ranker: OpportunityRanker,
}

impl ArbitrageDetector {
    /// Creates a detector with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Creates a detector with custom configuration.
    #[must_use]
    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            matcher: GameMatcher::new(),
            comparator: MarketComparator::new(),
            calculator: ArbitrageCalculator::with_config(&config),
            ranker: OpportunityRanker::new(config.max_results),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Scans a snapshot, stamping records with the current time.
    #[must_use]
    pub fn scan(&self, snapshot: &OddsSnapshot) -> DetectionReport {
        self.scan_at(snapshot, unix_timestamp(Utc::now()))
    }

    /// Scans a snapshot, stamping records with `timestamp`.
    #[must_use]
    pub fn scan_at(&self, snapshot: &OddsSnapshot, timestamp: f64) -> DetectionReport {
        let (opportunities, mut summary) = self.detect(snapshot, timestamp);

        summary.opportunities_found = opportunities.len();
        summary.best_roi = opportunities
            .iter()
            .map(|o| o.roi)
            .max_by(f64::total_cmp);

        let opportunities = self.ranker.rank(opportunities);

        info!(
            books = summary.books,
            games_seen = summary.games_seen,
            games_matched = summary.games_matched,
            leg_pairs = summary.leg_pairs_evaluated,
            found = summary.opportunities_found,
            reported = opportunities.len(),
            "Detection pass complete"
        );

        DetectionReport {
            opportunities,
            summary,
        }
    }

    /// Produces every opportunity in detection order, without ranking.
    #[must_use]
    pub fn find_opportunities(
        &self,
        snapshot: &OddsSnapshot,
        timestamp: f64,
    ) -> Vec<ArbitrageOpportunity> {
        self.detect(snapshot, timestamp).0
    }

    fn detect(
        &self,
        snapshot: &OddsSnapshot,
        timestamp: f64,
    ) -> (Vec<ArbitrageOpportunity>, DetectionSummary) {
        let groups = self.matcher.group_games(snapshot);
        let mut summary = DetectionSummary {
            books: snapshot.book_count(),
            games_seen: groups.len(),
            ..DetectionSummary::default()
        };
        let mut opportunities = Vec::new();

        for game in groups.iter().filter(|g| g.is_comparable()) {
            summary.games_matched += 1;

            for market in MarketType::ALL {
                for legs in self.comparator.leg_pairs(game, market) {
                    summary.leg_pairs_evaluated += 1;

                    if let Some(opp) =
                        self.calculator
                            .evaluate(&legs, &game.key, &game.teams, timestamp)
                    {
                        debug!(
                            game = %opp.game,
                            market = %opp.market,
                            book1 = %opp.book1,
                            odds1 = opp.odds1,
                            book2 = %opp.book2,
                            odds2 = opp.odds2,
                            arb_percent = opp.arb_percent,
                            roi = opp.roi,
                            "Opportunity recorded"
                        );
                        opportunities.push(opp);
                    }
                }
            }
        }

        (opportunities, summary)
    }
}

impl Default for ArbitrageDetector {
    fn default() -> Self {
        Self::new()
    }
}
