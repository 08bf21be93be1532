pub mod config;
pub mod config_loader;
pub mod config_watcher;
pub mod odds;
pub mod traits;

pub use config::{AppConfig, BookConfig, BookSource, ConfigError, DetectorConfig, ScanConfig};
pub use config_loader::ConfigLoader;
pub use config_watcher::ConfigWatcher;
pub use odds::{
    unix_timestamp, AmericanOdds, BookGames, GameQuote, MarketType, OddsQuote, OddsSnapshot,
    TwoWayMarket,
};
pub use traits::OddsFeed;
