//! Ordering and truncation of detected opportunities.

use crate::types::ArbitrageOpportunity;

/// Default number of opportunities handed to output.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Orders opportunities by ROI, best first, and keeps the top few.
#[derive(Debug, Clone, Copy)]
pub struct OpportunityRanker {
    max_results: usize,
}

impl OpportunityRanker {
    #[must_use]
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    #[must_use]
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Sorts by `roi` descending and truncates to `max_results`.
    ///
    /// The sort is stable: opportunities with equal ROI keep their detection
    /// order.
    #[must_use]
    pub fn rank(&self, mut opportunities: Vec<ArbitrageOpportunity>) -> Vec<ArbitrageOpportunity> {
        opportunities.sort_by(|a, b| b.roi.total_cmp(&a.roi));
        opportunities.truncate(self.max_results);
        opportunities
    }
}

impl Default for OpportunityRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}
