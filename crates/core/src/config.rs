use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub detector: DetectorConfig,
    pub scan: ScanConfig,
    pub books: Vec<BookConfig>,
}

/// Thresholds and sizing inputs for arbitrage detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Margin over 100% combined implied probability required to emit a record.
    pub min_arb_percent: f64,
    /// Safety margin subtracted from the complementary probability when sizing.
    pub kelly_edge: f64,
    /// Bankroll that stake figures are normalized against.
    pub assumed_bankroll: f64,
    /// Maximum number of ranked opportunities handed to output.
    pub max_results: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_arb_percent: 0.01,
            kelly_edge: 0.01,
            assumed_bankroll: 1000.0,
            max_results: 10,
        }
    }
}

impl DetectorConfig {
    /// Sets the trigger margin.
    #[must_use]
    pub fn with_min_arb_percent(mut self, margin: f64) -> Self {
        self.min_arb_percent = margin;
        self
    }

    /// Sets the Kelly safety edge.
    #[must_use]
    pub fn with_kelly_edge(mut self, edge: f64) -> Self {
        self.kelly_edge = edge;
        self
    }

    /// Sets the assumed bankroll.
    #[must_use]
    pub fn with_bankroll(mut self, bankroll: f64) -> Self {
        self.assumed_bankroll = bankroll;
        self
    }

    /// Sets the ranking bound.
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Checks that the values can drive detection.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite margin or edge, a bankroll that is
    /// not finite and positive, or a zero result bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_arb_percent.is_finite() {
            return Err(ConfigError::Invalid {
                field: "detector.min_arb_percent",
                reason: format!("must be finite, got {}", self.min_arb_percent),
            });
        }
        if !self.kelly_edge.is_finite() {
            return Err(ConfigError::Invalid {
                field: "detector.kelly_edge",
                reason: format!("must be finite, got {}", self.kelly_edge),
            });
        }
        if !self.assumed_bankroll.is_finite() || self.assumed_bankroll <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "detector.assumed_bankroll",
                reason: format!("must be finite and positive, got {}", self.assumed_bankroll),
            });
        }
        if self.max_results == 0 {
            return Err(ConfigError::Invalid {
                field: "detector.max_results",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Seconds between refresh cycles in watch mode.
    pub interval_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

/// One sportsbook and where its odds come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookConfig {
    pub id: String,
    pub source: BookSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookSource {
    /// A JSON dump of the book's live page, re-read every cycle.
    JsonFile { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to load config: {0}")]
    Load(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}
