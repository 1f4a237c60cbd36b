use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The worst peak-to-trough decline of a series, with its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownWindow {
    /// Depth as a negative fraction (−0.25 = −25%).
    pub drawdown: f64,
    /// Date the running peak was set.
    pub peak_date: NaiveDate,
    /// Date the series bottomed against that peak.
    pub trough_date: NaiveDate,
}

/// A month-over-month return, observed at a month-end index value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthReturn {
    pub year: i32,
    pub month: u32,
    /// The last series date inside that month.
    pub date: NaiveDate,
    #[serde(rename = "return")]
    pub ret: f64,
}

/// The single best and single worst calendar months of a series. With
/// only one month-over-month transition, best and worst are the same
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestWorstMonth {
    pub best: MonthReturn,
    pub worst: MonthReturn,
}
