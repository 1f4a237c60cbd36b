//! # Meridian Backtester
//!
//! Turns raw holdings into a single weighted index series. Three stages:
//! the allocation normalizer cleans and scales (symbol, weight) pairs,
//! the return builder converts each symbol's price history into a
//! date-keyed daily return map, and the index backtester combines the
//! legs over their common trading calendar into a base-100 series.
//!
//! All data-insufficiency conditions (short histories, unknown symbols,
//! non-overlapping calendars) degrade to empty results; only provider
//! transport failures surface as errors.

pub mod allocation;
pub mod error;
pub mod index;
pub mod returns;

// Re-export the key components to create a clean, public-facing API.
pub use allocation::{normalize_allocations, parse_holdings};
pub use error::BacktestError;
pub use index::backtest_weighted_index;
pub use returns::daily_returns;
