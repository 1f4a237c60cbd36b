use crate::report::{BestWorstMonth, DrawdownWindow, MonthReturn};
use chrono::{Datelike, NaiveDate};
use core_types::IndexPoint;
use std::collections::BTreeMap;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// End-over-start return of a series. `None` for fewer than two points
/// or a nonpositive starting value.
pub fn total_return(series: &[IndexPoint]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let start = series[0].value;
    let end = series[series.len() - 1].value;
    if start <= 0.0 {
        return None;
    }
    Some(end / start - 1.0)
}

/// Compound annual growth rate between the series endpoints.
///
/// Elapsed time comes from the calendar dates, floored at 0.0001 years so
/// a same-day series cannot blow up the exponent.
pub fn cagr(series: &[IndexPoint]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let first = series[0];
    let last = series[series.len() - 1];
    if first.value <= 0.0 || last.value <= 0.0 {
        return None;
    }
    let days = (last.date - first.date).num_days() as f64;
    let years = (days / 365.25).max(0.0001);
    Some((last.value / first.value).powf(1.0 / years) - 1.0)
}

/// Worst peak-to-trough decline as a negative fraction (≤ 0).
pub fn max_drawdown(series: &[IndexPoint]) -> Option<f64> {
    max_drawdown_window(series).map(|window| window.drawdown)
}

/// Worst peak-to-trough decline with the dates of its peak and trough.
pub fn max_drawdown_window(series: &[IndexPoint]) -> Option<DrawdownWindow> {
    if series.len() < 2 || series[0].value <= 0.0 {
        return None;
    }

    let mut peak = series[0];
    let mut worst = DrawdownWindow {
        drawdown: 0.0,
        peak_date: peak.date,
        trough_date: peak.date,
    };
    for point in series {
        if point.value > peak.value {
            peak = *point;
        }
        let drawdown = point.value / peak.value - 1.0;
        if drawdown < worst.drawdown {
            worst = DrawdownWindow {
                drawdown,
                peak_date: peak.date,
                trough_date: point.date,
            };
        }
    }
    Some(worst)
}

/// Sample standard deviation of daily returns, scaled to a year of 252
/// trading days. `None` when fewer than two returns can be derived or
/// the returns have no variance.
pub fn annualized_volatility(series: &[IndexPoint]) -> Option<f64> {
    if series.len() < 3 {
        return None;
    }
    let returns: Vec<f64> = daily_index_returns(series).into_values().collect();
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns
        .iter()
        .map(|daily_return| (daily_return - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    if variance <= 0.0 {
        return None;
    }
    Some(variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Pearson correlation of two series' daily returns, restricted to the
/// dates both have. Needs at least five overlapping return dates and
/// strictly positive variance on both sides.
pub fn correlation(a: &[IndexPoint], b: &[IndexPoint]) -> Option<f64> {
    if a.len() < 3 || b.len() < 3 {
        return None;
    }
    let returns_a = daily_index_returns(a);
    let returns_b = daily_index_returns(b);

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (date, x) in &returns_a {
        if let Some(y) = returns_b.get(date) {
            xs.push(*x);
            ys.push(*y);
        }
    }
    if xs.len() < 5 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }
    if variance_x <= 0.0 || variance_y <= 0.0 {
        return None;
    }
    Some(covariance / (variance_x.sqrt() * variance_y.sqrt()))
}

/// The single best and single worst calendar months, measured between
/// consecutive month-end index values. Needs a reasonably dense series
/// (≥ 25 points) spanning at least two months.
pub fn best_worst_month(series: &[IndexPoint]) -> Option<BestWorstMonth> {
    if series.len() < 25 {
        return None;
    }

    // Last recorded value per (year, month); insertion order keeps the
    // final point of each month since the series is ascending.
    let mut month_ends: BTreeMap<(i32, u32), IndexPoint> = BTreeMap::new();
    for point in series {
        month_ends.insert((point.date.year(), point.date.month()), *point);
    }
    if month_ends.len() < 2 {
        return None;
    }

    let entries: Vec<((i32, u32), IndexPoint)> = month_ends.into_iter().collect();
    let mut best: Option<MonthReturn> = None;
    let mut worst: Option<MonthReturn> = None;
    for pair in entries.windows(2) {
        let (_, prev) = pair[0];
        let ((year, month), current) = pair[1];
        if prev.value <= 0.0 {
            continue;
        }
        let ret = current.value / prev.value - 1.0;
        let candidate = MonthReturn {
            year,
            month,
            date: current.date,
            ret,
        };
        if best.map_or(true, |b| ret > b.ret) {
            best = Some(candidate);
        }
        if worst.map_or(true, |w| ret < w.ret) {
            worst = Some(candidate);
        }
    }

    Some(BestWorstMonth {
        best: best?,
        worst: worst?,
    })
}

/// Daily returns of an index series, keyed by the later date of each
/// adjacent pair. Mirrors the per-symbol return builder: a nonpositive
/// earlier value suppresses that pair.
fn daily_index_returns(series: &[IndexPoint]) -> BTreeMap<NaiveDate, f64> {
    series
        .windows(2)
        .filter(|pair| pair[0].value > 0.0)
        .map(|pair| (pair[1].date, pair[1].value / pair[0].value - 1.0))
        .collect()
}
