//! Output record of the detection pipeline.

use odds_arb_core::MarketType;
use serde::{Deserialize, Serialize};

/// A priced two-leg position across two books.
///
/// Field order is the column order used by tabular exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    /// Canonical game key, e.g. `"yankees vs red sox"`.
    pub game: String,
    pub market: MarketType,
    /// Book for the first leg.
    pub book1: String,
    /// Book for the second leg.
    pub book2: String,
    pub team1: String,
    pub team2: String,
    /// American price of the first leg at `book1`.
    pub odds1: i32,
    /// American price of the second leg at `book2`.
    pub odds2: i32,
    pub stake1: f64,
    pub stake2: f64,
    /// Always `stake1 + stake2`.
    pub total_stake: f64,
    /// Worst-case profit across the two outcomes.
    pub profit: f64,
    /// `profit / total_stake` as a percentage, zero when nothing is staked.
    pub roi: f64,
    /// Combined implied probability above 100%, as a percentage.
    pub arb_percent: f64,
    /// Detection time in seconds since the Unix epoch.
    pub timestamp: f64,
}

impl ArbitrageOpportunity {
    /// Returns true when sizing left nothing to stake.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.total_stake <= 0.0
    }

    /// Display label for the first leg, e.g. `"fanduel (-110)"`.
    #[must_use]
    pub fn leg1_label(&self) -> String {
        format!("{} ({})", self.book1, self.odds1)
    }

    /// Display label for the second leg.
    #[must_use]
    pub fn leg2_label(&self) -> String {
        format!("{} ({})", self.book2, self.odds2)
    }
}
