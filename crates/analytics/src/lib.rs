//! # Meridian Analytics
//!
//! Descriptive statistics over backtested index series. It acts as the
//! "unbiased judge" of the system: pure `f64` functions with no knowledge
//! of providers, caches or presets.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** depends only on `core-types` (Layer 0).
//! - **Absent over thrown:** every statistic returns an `Option` and
//!   yields `None` on insufficient data: a one-point series, a
//!   nonpositive starting value, a zero-variance return stream. Nothing
//!   here logs or raises; callers decide what a missing statistic means.

pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{
    annualized_volatility, best_worst_month, cagr, correlation, max_drawdown,
    max_drawdown_window, total_return,
};
pub use report::{BestWorstMonth, DrawdownWindow, MonthReturn};
