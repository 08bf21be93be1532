//! Odds conversion, trigger evaluation, and two-leg stake sizing.
//!
//! Each leg is sized with a Kelly-style fraction against the other leg's
//! implied probability, less a fixed safety edge:
//!
//! ```text
//! kelly1 = clamp(((d1 - 1) * (1 - p2 - edge) - p2) / (d1 - 1), 0, 1)
//! kelly2 = clamp(((d2 - 1) * (1 - p1 - edge) - p1) / (d2 - 1), 0, 1)
//! stake  = kelly * bankroll
//! profit = min(stake1 * d1, stake2 * d2) - (stake1 + stake2)
//! ```
//!
//! # Trigger
//!
//! A record is produced when `p1 + p2 >= 1 + min_arb_percent`, i.e. when
//! the two prices together carry *more* than 100% implied probability.
//! Textbook arbitrage is the opposite (`p1 + p2 < 1`). The condition is kept
//! as configured until it is reviewed; with the default margin and edge it
//! always sizes both legs to zero.

use odds_arb_core::{AmericanOdds, DetectorConfig};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::comparator::LegPair;
use crate::types::ArbitrageOpportunity;

/// Converts an American price to a decimal payout factor.
#[must_use]
pub fn american_to_decimal(odds: AmericanOdds) -> f64 {
    odds.to_decimal()
}

/// Break-even probability of an American price.
#[must_use]
pub fn implied_probability(odds: AmericanOdds) -> f64 {
    odds.implied_probability()
}

/// Kelly-style fraction for one leg, clamped to `[0, 1]`.
///
/// `decimal` is the leg's own payout factor; `opposing_prob` is the implied
/// probability of the other leg.
#[must_use]
pub fn kelly_fraction(decimal: f64, opposing_prob: f64, edge: f64) -> f64 {
    let net = decimal - 1.0;
    let raw = (net * (1.0 - opposing_prob - edge) - opposing_prob) / net;
    raw.clamp(0.0, 1.0)
}

/// Intermediate and final figures of a two-leg allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakePlan {
    pub decimal1: f64,
    pub decimal2: f64,
    pub prob1: f64,
    pub prob2: f64,
    pub kelly1: f64,
    pub kelly2: f64,
    pub stake1: f64,
    pub stake2: f64,
    pub total_stake: f64,
    /// Net result if leg 1 wins.
    pub profit1: f64,
    /// Net result if leg 2 wins.
    pub profit2: f64,
    pub profit: f64,
    pub roi: f64,
}

impl StakePlan {
    /// Combined implied probability of both legs.
    #[must_use]
    pub fn total_prob(&self) -> f64 {
        self.prob1 + self.prob2
    }

    /// Combined implied probability above 100%, as a percentage.
    #[must_use]
    pub fn arb_percent(&self) -> f64 {
        (self.total_prob() - 1.0) * 100.0
    }
}

/// Evaluates leg pairs against the trigger and sizes the stakes.
#[derive(Debug, Clone)]
pub struct ArbitrageCalculator {
    min_arb_percent: f64,
    kelly_edge: f64,
    bankroll: f64,
}

impl ArbitrageCalculator {
    /// Creates a calculator with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&DetectorConfig::default())
    }

    /// Creates a calculator from detector configuration.
    #[must_use]
    pub fn with_config(config: &DetectorConfig) -> Self {
        Self {
            min_arb_percent: config.min_arb_percent,
            kelly_edge: config.kelly_edge,
            bankroll: config.assumed_bankroll,
        }
    }

    /// Returns true if two implied probabilities clear the trigger.
    #[must_use]
    pub fn triggers(&self, prob1: f64, prob2: f64) -> bool {
        prob1 + prob2 >= 1.0 + self.min_arb_percent
    }

    /// Sizes both legs, whether or not the trigger fires.
    #[must_use]
    pub fn size_stakes(&self, odds1: AmericanOdds, odds2: AmericanOdds) -> StakePlan {
        let decimal1 = american_to_decimal(odds1);
        let decimal2 = american_to_decimal(odds2);
        let prob1 = 1.0 / decimal1;
        let prob2 = 1.0 / decimal2;

        let kelly1 = kelly_fraction(decimal1, prob2, self.kelly_edge);
        let kelly2 = kelly_fraction(decimal2, prob1, self.kelly_edge);

        let stake1 = kelly1 * self.bankroll;
        let stake2 = kelly2 * self.bankroll;
        let total_stake = stake1 + stake2;

        let profit1 = stake1 * decimal1 - total_stake;
        let profit2 = stake2 * decimal2 - total_stake;
        let profit = profit1.min(profit2);
        let roi = if total_stake > 0.0 {
            (profit / total_stake) * 100.0
        } else {
            0.0
        };

        StakePlan {
            decimal1,
            decimal2,
            prob1,
            prob2,
            kelly1,
            kelly2,
            stake1,
            stake2,
            total_stake,
            profit1,
            profit2,
            profit,
            roi,
        }
    }

    /// Evaluates one pair of prices.
    ///
    /// Returns the sized plan if the trigger fires, `None` otherwise. A plan
    /// with zero stakes is still returned.
    #[must_use]
    pub fn evaluate_odds(&self, odds1: AmericanOdds, odds2: AmericanOdds) -> Option<StakePlan> {
        let plan = self.size_stakes(odds1, odds2);

        if !self.triggers(plan.prob1, plan.prob2) {
            trace!(
                odds1 = odds1.value(),
                odds2 = odds2.value(),
                total_prob = plan.total_prob(),
                "Below trigger margin"
            );
            return None;
        }

        Some(plan)
    }

    /// Evaluates a leg pair for a game, producing the output record.
    #[must_use]
    pub fn evaluate(
        &self,
        legs: &LegPair<'_>,
        game: &str,
        teams: &[String; 2],
        timestamp: f64,
    ) -> Option<ArbitrageOpportunity> {
        let plan = self.evaluate_odds(legs.odds1, legs.odds2)?;
        Some(build_opportunity(legs, game, teams, &plan, timestamp))
    }
}

impl Default for ArbitrageCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn build_opportunity(
    legs: &LegPair<'_>,
    game: &str,
    teams: &[String; 2],
    plan: &StakePlan,
    timestamp: f64,
) -> ArbitrageOpportunity {
    ArbitrageOpportunity {
        game: game.to_string(),
        market: legs.market,
        book1: legs.book1.to_string(),
        book2: legs.book2.to_string(),
        team1: teams[0].clone(),
        team2: teams[1].clone(),
        odds1: legs.odds1.value(),
        odds2: legs.odds2.value(),
        stake1: plan.stake1,
        stake2: plan.stake2,
        total_stake: plan.total_stake,
        profit: plan.profit,
        roi: plan.roi,
        arb_percent: plan.arb_percent(),
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odds_arb_core::MarketType;

    const EPS: f64 = 1e-9;

    fn odds(value: i32) -> AmericanOdds {
        AmericanOdds::new(value).unwrap()
    }

    fn legs(odds1: i32, odds2: i32) -> LegPair<'static> {
        LegPair {
            market: MarketType::Moneyline,
            book1: "fanduel",
            book2: "draftkings",
            outcome1: 0,
            outcome2: 1,
            odds1: odds(odds1),
            odds2: odds(odds2),
        }
    }

    fn teams() -> [String; 2] {
        ["yankees".to_string(), "red sox".to_string()]
    }

    // ==================== Conversion Tests ====================

    #[test]
    fn test_american_to_decimal() {
        assert!((american_to_decimal(odds(100)) - 2.0).abs() < EPS);
        assert!((american_to_decimal(odds(250)) - 3.5).abs() < EPS);
        assert!((american_to_decimal(odds(-100)) - 2.0).abs() < EPS);
        assert!((american_to_decimal(odds(-110)) - 1.909_090_909_090_909).abs() < EPS);
        assert!((american_to_decimal(odds(-400)) - 1.25).abs() < EPS);
    }

    #[test]
    fn test_implied_probability() {
        assert!((implied_probability(odds(100)) - 0.5).abs() < EPS);
        assert!((implied_probability(odds(-110)) - 0.523_809_523_809_523_8).abs() < EPS);
        assert!((implied_probability(odds(300)) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_decimal_monotonic_in_price_quality() {
        let ladder = [-1000, -400, -200, -110, -101, 100, 101, 150, 400, 1000];
        for pair in ladder.windows(2) {
            assert!(
                american_to_decimal(odds(pair[1])) >= american_to_decimal(odds(pair[0])),
                "{} vs {}",
                pair[0],
                pair[1]
            );
        }
    }

    // ==================== Kelly Fraction Tests ====================

    #[test]
    fn test_kelly_fraction_clamps_negative_to_zero() {
        let d = american_to_decimal(odds(-110));
        let p = implied_probability(odds(-110));
        assert_eq!(kelly_fraction(d, p, 0.01), 0.0);
    }

    #[test]
    fn test_kelly_fraction_clamps_above_one() {
        // Huge payout against an opposing probability near zero.
        assert_eq!(kelly_fraction(50.0, 0.0, -0.5), 1.0);
    }

    #[test]
    fn test_kelly_fraction_interior() {
        // d = 2, p = 0.3, edge = 0: (1 * 0.7 - 0.3) / 1 = 0.4
        assert!((kelly_fraction(2.0, 0.3, 0.0) - 0.4).abs() < EPS);
    }

    // ==================== Trigger Tests ====================

    #[test]
    fn test_trigger_boundary() {
        let calc = ArbitrageCalculator::new();

        assert!(calc.triggers(0.52, 0.50));
        assert!(!calc.triggers(0.505, 0.50));
        assert!(calc.triggers(0.6, 0.6));
        assert!(!calc.triggers(0.5, 0.5));
        assert!(!calc.triggers(0.4, 0.5));
    }

    #[test]
    fn test_no_record_below_margin() {
        let calc = ArbitrageCalculator::new();

        // +100 / +100: total probability exactly 1.0
        assert!(calc.evaluate(&legs(100, 100), "g", &teams(), 0.0).is_none());
        // +110 / -105: total probability below 1.0
        assert!(calc.evaluate(&legs(110, -105), "g", &teams(), 0.0).is_none());
    }

    // ==================== Sizing Tests ====================

    #[test]
    fn test_even_juice_scenario_emits_zero_stakes() {
        let calc = ArbitrageCalculator::new();
        let opp = calc
            .evaluate(&legs(-110, -110), "yankees vs red sox", &teams(), 42.0)
            .expect("trigger should fire");

        assert_eq!(opp.stake1, 0.0);
        assert_eq!(opp.stake2, 0.0);
        assert_eq!(opp.total_stake, 0.0);
        assert_eq!(opp.profit, 0.0);
        assert_eq!(opp.roi, 0.0);
        assert!((opp.arb_percent - 4.761_904_761_904_762).abs() < 1e-9);
        assert!(opp.is_degenerate());

        assert_eq!(opp.game, "yankees vs red sox");
        assert_eq!(opp.market, MarketType::Moneyline);
        assert_eq!((opp.book1.as_str(), opp.book2.as_str()), ("fanduel", "draftkings"));
        assert_eq!((opp.team1.as_str(), opp.team2.as_str()), ("yankees", "red sox"));
        assert_eq!((opp.odds1, opp.odds2), (-110, -110));
        assert!((opp.timestamp - 42.0).abs() < EPS);
    }

    #[test]
    fn test_even_juice_plan_values() {
        let plan = ArbitrageCalculator::new().size_stakes(odds(-110), odds(-110));

        assert!((plan.decimal1 - 1.909_09).abs() < 1e-5);
        assert!((plan.prob1 - 0.523_81).abs() < 1e-5);
        assert!((plan.total_prob() - 1.047_62).abs() < 1e-5);
        assert_eq!(plan.kelly1, 0.0);
        assert_eq!(plan.kelly2, 0.0);
    }

    #[test]
    fn test_default_config_never_stakes_when_triggered() {
        let calc = ArbitrageCalculator::new();
        let ladder = [-1000, -500, -300, -200, -150, -120, -110, -105, 100, 105, 120, 150, 200, 400];

        for &a in &ladder {
            for &b in &ladder {
                if let Some(plan) = calc.evaluate_odds(odds(a), odds(b)) {
                    assert_eq!(plan.total_stake, 0.0, "{a} / {b}");
                    assert_eq!(plan.roi, 0.0, "{a} / {b}");
                }
            }
        }
    }

    #[test]
    fn test_stake_conservation_with_nonzero_stakes() {
        let config = DetectorConfig::default().with_kelly_edge(-0.2);
        let calc = ArbitrageCalculator::with_config(&config);

        let opp = calc
            .evaluate(&legs(100, -110), "g", &teams(), 0.0)
            .expect("trigger should fire");
        let d1 = american_to_decimal(odds(100));
        let d2 = american_to_decimal(odds(-110));

        assert!(opp.stake1 > 0.0);
        assert!(opp.stake2 > 0.0);
        assert!((opp.stake1 + opp.stake2 - opp.total_stake).abs() < 1e-9);

        let expected_profit =
            (opp.stake1 * d1 - opp.total_stake).min(opp.stake2 * d2 - opp.total_stake);
        assert!((opp.profit - expected_profit).abs() < 1e-9);
        assert!((opp.roi - opp.profit / opp.total_stake * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_known_allocation() {
        // +100 vs -110 with edge -0.2:
        //   kelly1 = (1.0 * (1 - 0.5238 + 0.2) - 0.5238) / 1.0 = 0.152381
        //   kelly2 = (0.9091 * (1 - 0.5 + 0.2) - 0.5) / 0.9091 = 0.15
        let config = DetectorConfig::default().with_kelly_edge(-0.2);
        let plan = ArbitrageCalculator::with_config(&config).size_stakes(odds(100), odds(-110));

        assert!((plan.stake1 - 152.380_952).abs() < 1e-3);
        assert!((plan.stake2 - 150.0).abs() < 1e-3);
        assert!((plan.total_stake - 302.380_952).abs() < 1e-3);
        assert!((plan.profit1 - 2.380_952).abs() < 1e-3);
        assert!((plan.profit2 - (150.0 * 1.909_090_909 - 302.380_952)).abs() < 1e-3);
        assert!((plan.profit - plan.profit2).abs() < EPS);
    }

    #[test]
    fn test_bankroll_scales_stakes() {
        let base = DetectorConfig::default().with_kelly_edge(-0.2);
        let small = ArbitrageCalculator::with_config(&base).size_stakes(odds(100), odds(-110));
        let large = ArbitrageCalculator::with_config(&base.clone().with_bankroll(2000.0))
            .size_stakes(odds(100), odds(-110));

        assert!((large.stake1 - 2.0 * small.stake1).abs() < 1e-9);
        assert!((large.roi - small.roi).abs() < 1e-9);
    }
}
