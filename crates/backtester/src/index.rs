use crate::error::BacktestError;
use crate::returns::daily_returns;
use chrono::NaiveDate;
use core_types::{Allocation, IndexPoint, ReturnMap};
use market_data::PriceHistoryProvider;
use std::collections::BTreeSet;
use tracing::debug;

/// Base value of every backtested index series.
pub const INDEX_BASE: f64 = 100.0;

/// Builds a daily weighted index series, base 100, for an allocation set.
///
/// Histories are fetched sequentially, one leg per allocation entry;
/// repeated symbols stay separate legs. The series is computed only over
/// the dates present in *every* leg's return map: forward-filling missing
/// prices would fabricate returns for days an instrument did not trade,
/// so mixing calendars (a crypto asset against a weekday-only ETF)
/// intentionally shrinks the sample to the shared dates.
///
/// An empty allocation set, any leg with no returns, or an empty
/// intersection all yield an empty series, not an error. Only provider
/// transport failures propagate.
pub async fn backtest_weighted_index(
    provider: &dyn PriceHistoryProvider,
    allocations: &[Allocation],
    days: u32,
) -> Result<Vec<IndexPoint>, BacktestError> {
    if allocations.is_empty() {
        return Ok(Vec::new());
    }

    let mut legs: Vec<ReturnMap> = Vec::with_capacity(allocations.len());
    for allocation in allocations {
        let history = provider.fetch_history(&allocation.symbol, days).await?;
        legs.push(daily_returns(&history));
    }

    let mut common: BTreeSet<NaiveDate> = legs[0].keys().copied().collect();
    for leg in &legs[1..] {
        common.retain(|date| leg.contains_key(date));
    }
    debug!(
        legs = legs.len(),
        common_dates = common.len(),
        "built common trading calendar"
    );
    if common.is_empty() {
        return Ok(Vec::new());
    }

    let mut value = INDEX_BASE;
    let mut out = Vec::with_capacity(common.len());
    'dates: for date in &common {
        let mut combined = 0.0;
        for (allocation, leg) in allocations.iter().zip(&legs) {
            // Guaranteed by the intersection; if a lookup still misses,
            // drop the date without touching the running value.
            match leg.get(date) {
                Some(daily_return) => combined += allocation.weight * daily_return,
                None => continue 'dates,
            }
        }
        value *= 1.0 + combined;
        out.push(IndexPoint { date: *date, value });
    }

    Ok(out)
}
