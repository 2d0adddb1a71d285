//! Standings for score sequences that may contain ties.
//!
//! ```rust
//! use ranking::{Rank, Ranking, Strategy};
//!
//! let scores = [10, 8, 8, 6];
//! let pairs = Ranking::new(&scores[..])
//!     .with_strategy(Strategy::Fractional)
//!     .pairs()
//!     .unwrap();
//! assert_eq!(pairs[1], (Some(Rank::Fractional(1.5)), &8));
//! assert_eq!(pairs[3], (Some(Rank::Integer(3)), &6));
//! ```

pub mod config;
pub mod error;
pub mod rank;
pub mod ranking;
pub mod strategy;

// Re-export commonly used types
pub use config::{RankingConfig, RankingConfigBuilder};
pub use error::{Error, Result};
pub use rank::Rank;
pub use ranking::{CmpFn, Compare, Identity, Iter, KeyFn, Natural, Ranked, Ranking, ScoreKey};
pub use strategy::{
    competition, dense, fractional, modified_competition, ordinal, Strategy, StrategyFn, TieRanks,
};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
