//! Sportsbook odds feeds.
//!
//! Each book is read through an [`OddsFeed`](odds_arb_core::OddsFeed)
//! implementation. The [`SnapshotCollector`] reads all books concurrently
//! once per cycle and hands the detector an immutable snapshot.
//!
//! - [`JsonFileFeed`]: raw text captured from a book's live page
//! - [`StaticFeed`]: fixed games, for tests and replays

pub mod collector;
pub mod error;
pub mod file;
pub mod memory;
pub mod parse;
pub mod registry;

pub use collector::{index_games, SnapshotCollector};
pub use error::{FeedError, Result};
pub use file::{JsonFileFeed, PageDump, ScrapedRow};
pub use memory::StaticFeed;
pub use parse::{parse_american_odds, parse_team_name};
pub use registry::build_feeds;
