use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single daily observation for one instrument.
///
/// Providers must return these in ascending date order, at most one per
/// date per symbol. The price is optional: upstream sources occasionally
/// publish a row without a usable value, and those gaps are carried
/// through rather than zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Option<f64>,
}

/// One leg of a normalized allocation set.
///
/// The weight is a fraction in (0, 1]; a full set sums to 1.0 within
/// floating tolerance. Repeated symbols are legal and are carried as
/// separate legs, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub symbol: String,
    pub weight: f64,
}

/// A point on a synthetic weighted index series, base value 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Daily returns keyed by date, for one symbol or one index series.
///
/// An ordered map, because the backtest and month aggregation both need
/// sorted iteration and date-set intersection.
pub type ReturnMap = BTreeMap<NaiveDate, f64>;
