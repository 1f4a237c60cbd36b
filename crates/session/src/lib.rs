//! # Meridian Session Orchestrator
//!
//! Glue between a user's request (a preset code, saved holdings, or raw
//! holdings text) and the computational core. It resolves allocations,
//! runs the backtester for the portfolio and each configured benchmark,
//! asks the analytics engine for every statistic, and slices the series
//! into the fixed reporting horizons.
//!
//! This is the only layer that *logs* data problems: a provider failure
//! on any leg is degraded to an empty series here, so a broken upstream
//! never takes the rest of the report down with it.

use backtester::{backtest_weighted_index, normalize_allocations, parse_holdings};
use configuration::{Horizon, Settings};
use core_types::{Allocation, IndexPoint};
use market_data::PriceHistoryProvider;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use error::SessionError;
pub use report::{BenchmarkReport, HorizonRow, InsightsReport, SessionReport};

pub struct SessionOrchestrator {
    provider: Arc<dyn PriceHistoryProvider>,
    settings: Settings,
}

impl SessionOrchestrator {
    pub fn new(provider: Arc<dyn PriceHistoryProvider>, settings: Settings) -> Self {
        Self { provider, settings }
    }

    /// Runs a session for a preset code. Unknown codes fall back to the
    /// configured default preset.
    pub async fn run_preset(
        &self,
        code: &str,
        days: u32,
    ) -> Result<SessionReport, SessionError> {
        let preset = self
            .settings
            .preset_or_default(code)
            .ok_or(SessionError::NoPresetConfigured)?;
        debug!(requested = code, resolved = %preset.label, "resolved preset");
        let allocations = normalize_allocations(
            preset
                .holdings
                .iter()
                .map(|holding| (holding.symbol.as_str(), holding.weight)),
        );
        Ok(self.run(preset.label.clone(), allocations, days).await)
    }

    /// Runs a session for raw holdings text, one `SYMBOL WEIGHT` pair per
    /// line. Unusable lines are skipped; if nothing survives, that is a
    /// caller error rather than an empty report.
    pub async fn run_holdings(
        &self,
        text: &str,
        days: u32,
    ) -> Result<SessionReport, SessionError> {
        let allocations = normalize_allocations(parse_holdings(text));
        if allocations.is_empty() {
            return Err(SessionError::EmptyHoldings);
        }
        Ok(self.run("Custom".to_string(), allocations, days).await)
    }

    /// Runs a session for an already-normalized allocation set.
    pub async fn run(
        &self,
        label: String,
        allocations: Vec<Allocation>,
        days: u32,
    ) -> SessionReport {
        let series = self.backtest_or_empty(&allocations, days).await;
        let horizons = self.what_if_rows(&series);

        let mut benchmark_correlations = BTreeMap::new();
        let mut benchmarks = Vec::with_capacity(self.settings.benchmarks.len());
        for benchmark in &self.settings.benchmarks {
            let bench_allocations =
                normalize_allocations([(benchmark.symbol.as_str(), 1.0)]);
            let bench_series = self.backtest_or_empty(&bench_allocations, days).await;
            benchmark_correlations.insert(
                benchmark.code.clone(),
                analytics::correlation(&series, &bench_series),
            );
            benchmarks.push(BenchmarkReport {
                code: benchmark.code.clone(),
                label: benchmark.label.clone(),
                symbol: benchmark.symbol.clone(),
                horizons: self.what_if_rows(&bench_series),
                series: bench_series,
            });
        }

        let insights = InsightsReport {
            total_return: analytics::total_return(&series),
            cagr: analytics::cagr(&series),
            max_drawdown: analytics::max_drawdown(&series),
            volatility: analytics::annualized_volatility(&series),
            drawdown: analytics::max_drawdown_window(&series),
            best_worst_month: analytics::best_worst_month(&series),
            benchmark_correlations,
        };

        SessionReport {
            label,
            allocations,
            days,
            investment: self.settings.backtest.investment,
            series,
            horizons,
            insights,
            benchmarks,
        }
    }

    async fn backtest_or_empty(&self, allocations: &[Allocation], days: u32) -> Vec<IndexPoint> {
        match backtest_weighted_index(self.provider.as_ref(), allocations, days).await {
            Ok(series) => series,
            Err(error) => {
                warn!(%error, "backtest failed; reporting an empty series");
                Vec::new()
            }
        }
    }

    fn what_if_rows(&self, series: &[IndexPoint]) -> Vec<HorizonRow> {
        self.settings
            .backtest
            .horizons
            .iter()
            .map(|horizon| self.what_if_row(series, horizon))
            .collect()
    }

    fn what_if_row(&self, series: &[IndexPoint], horizon: &Horizon) -> HorizonRow {
        let window = horizon_window(series, horizon.days).unwrap_or(&[]);
        let total_return = analytics::total_return(window);
        HorizonRow {
            label: horizon.label.clone(),
            days: horizon.days,
            total_return,
            cagr: analytics::cagr(window),
            end_value: total_return
                .map(|tr| self.settings.backtest.investment * (1.0 + tr)),
        }
    }
}

/// The trailing `days`-point window of a series, absent when the series
/// is too short to fill it.
pub fn horizon_window(series: &[IndexPoint], days: usize) -> Option<&[IndexPoint]> {
    if days == 0 || series.len() < days {
        return None;
    }
    Some(&series[series.len() - days..])
}
