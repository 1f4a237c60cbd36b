use analytics::{BestWorstMonth, DrawdownWindow};
use core_types::{Allocation, IndexPoint};
use serde::Serialize;
use std::collections::BTreeMap;

/// What a fixed hypothetical investment would have done over one trailing
/// horizon. Every field is absent when the series is shorter than the
/// horizon asks for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonRow {
    pub label: String,
    pub days: usize,
    pub total_return: Option<f64>,
    pub cagr: Option<f64>,
    /// Ending value of the configured investment, e.g. 11 000.0 for +10%.
    pub end_value: Option<f64>,
}

/// Descriptive statistics over the full portfolio series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    pub total_return: Option<f64>,
    pub cagr: Option<f64>,
    pub max_drawdown: Option<f64>,
    pub volatility: Option<f64>,
    pub drawdown: Option<DrawdownWindow>,
    pub best_worst_month: Option<BestWorstMonth>,
    /// Correlation of the portfolio's returns against each benchmark,
    /// keyed by benchmark code.
    pub benchmark_correlations: BTreeMap<String, Option<f64>>,
}

/// One benchmark's backtest alongside the portfolio's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub code: String,
    pub label: String,
    pub symbol: String,
    pub series: Vec<IndexPoint>,
    pub horizons: Vec<HorizonRow>,
}

/// The full result of one portfolio session: the backtested series, its
/// horizon what-if rows, the insight statistics, and the benchmarks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// Preset label, or "Custom" for user-entered holdings.
    pub label: String,
    pub allocations: Vec<Allocation>,
    pub days: u32,
    /// The hypothetical amount behind every horizon `end_value`.
    pub investment: f64,
    pub series: Vec<IndexPoint>,
    pub horizons: Vec<HorizonRow>,
    pub insights: InsightsReport,
    pub benchmarks: Vec<BenchmarkReport>,
}
