//! Integration tests for the index backtester, using an in-memory
//! provider in place of a live quote source.

use async_trait::async_trait;
use backtester::{backtest_weighted_index, normalize_allocations};
use chrono::NaiveDate;
use core_types::PricePoint;
use market_data::{MarketDataError, PriceHistoryProvider};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

struct FixtureProvider {
    histories: HashMap<String, Vec<PricePoint>>,
    calls: AtomicUsize,
}

impl FixtureProvider {
    fn new(histories: Vec<(&str, Vec<PricePoint>)>) -> Self {
        Self {
            histories: histories
                .into_iter()
                .map(|(symbol, points)| (symbol.to_string(), points))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PriceHistoryProvider for FixtureProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        _days: u32,
    ) -> Result<Vec<PricePoint>, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Unknown symbols are an empty history, never an error.
        Ok(self.histories.get(symbol).cloned().unwrap_or_default())
    }
}

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn history(points: &[(u32, f64)]) -> Vec<PricePoint> {
    points
        .iter()
        .map(|&(day, price)| PricePoint {
            date: d(day),
            price: Some(price),
        })
        .collect()
}

#[tokio::test]
async fn single_allocation_compounds_each_return_date() {
    let provider = FixtureProvider::new(vec![(
        "smh.us",
        history(&[(2, 100.0), (3, 110.0), (4, 99.0), (5, 108.9)]),
    )]);
    let allocations = normalize_allocations(vec![("smh.us", 1.0)]);

    let series = backtest_weighted_index(&provider, &allocations, 30)
        .await
        .unwrap();

    // Four prices give three return dates, so exactly three index points.
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].date, d(3));
    assert!((series[0].value - 110.0).abs() < 1e-9);
    assert!((series[1].value - 99.0).abs() < 1e-9);
    assert!((series[2].value - 108.9).abs() < 1e-9);
}

#[tokio::test]
async fn weighted_legs_combine_per_date() {
    let provider = FixtureProvider::new(vec![
        ("aaa.us", history(&[(2, 100.0), (3, 110.0), (4, 121.0)])),
        ("bbb.us", history(&[(2, 50.0), (3, 45.0), (4, 49.5)])),
    ]);
    let allocations = normalize_allocations(vec![("aaa.us", 1.0), ("bbb.us", 1.0)]);

    let series = backtest_weighted_index(&provider, &allocations, 30)
        .await
        .unwrap();

    // Day 3: 0.5 * 0.10 + 0.5 * -0.10 = 0 -> value stays at 100.
    // Day 4: 0.5 * 0.10 + 0.5 * 0.10 = 0.10 -> 110.
    assert_eq!(series.len(), 2);
    assert!((series[0].value - 100.0).abs() < 1e-9);
    assert!((series[1].value - 110.0).abs() < 1e-9);
}

#[tokio::test]
async fn disjoint_calendars_yield_an_empty_series() {
    let provider = FixtureProvider::new(vec![
        ("aaa.us", history(&[(2, 100.0), (3, 110.0)])),
        ("bbb.us", history(&[(8, 50.0), (9, 55.0)])),
    ]);
    let allocations = normalize_allocations(vec![("aaa.us", 1.0), ("bbb.us", 1.0)]);

    let series = backtest_weighted_index(&provider, &allocations, 30)
        .await
        .unwrap();
    assert!(series.is_empty());
}

#[tokio::test]
async fn unknown_symbol_empties_the_whole_basket() {
    let provider = FixtureProvider::new(vec![(
        "aaa.us",
        history(&[(2, 100.0), (3, 110.0), (4, 121.0)]),
    )]);
    let allocations = normalize_allocations(vec![("aaa.us", 1.0), ("nosuch.us", 1.0)]);

    let series = backtest_weighted_index(&provider, &allocations, 30)
        .await
        .unwrap();
    assert!(series.is_empty());
}

#[tokio::test]
async fn empty_allocation_set_makes_no_provider_calls() {
    let provider = FixtureProvider::new(vec![]);

    let series = backtest_weighted_index(&provider, &[], 30).await.unwrap();

    assert!(series.is_empty());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn duplicate_symbols_match_a_consolidated_weight() {
    let provider = FixtureProvider::new(vec![(
        "aaa.us",
        history(&[(2, 100.0), (3, 110.0), (4, 99.0)]),
    )]);

    let duplicated = normalize_allocations(vec![("aaa.us", 1.0), ("aaa.us", 1.0)]);
    let consolidated = normalize_allocations(vec![("aaa.us", 2.0)]);

    let series_dup = backtest_weighted_index(&provider, &duplicated, 30)
        .await
        .unwrap();
    let series_con = backtest_weighted_index(&provider, &consolidated, 30)
        .await
        .unwrap();

    assert_eq!(series_dup.len(), series_con.len());
    for (a, b) in series_dup.iter().zip(&series_con) {
        assert_eq!(a.date, b.date);
        assert!((a.value - b.value).abs() < 1e-9);
    }
}

#[tokio::test]
async fn price_gaps_shrink_the_common_calendar() {
    let mut gappy = history(&[(2, 100.0), (3, 110.0)]);
    gappy.push(PricePoint {
        date: d(4),
        price: None,
    });
    gappy.extend(history(&[(5, 121.0), (6, 133.1)]));

    let provider = FixtureProvider::new(vec![
        ("gappy.us", gappy),
        (
            "solid.us",
            history(&[(2, 10.0), (3, 11.0), (4, 12.0), (5, 13.0), (6, 14.0)]),
        ),
    ]);
    let allocations = normalize_allocations(vec![("gappy.us", 1.0), ("solid.us", 1.0)]);

    let series = backtest_weighted_index(&provider, &allocations, 30)
        .await
        .unwrap();

    // The gap removes day 4 and day 5 from the gappy leg, so only days 3
    // and 6 remain in common.
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].date, d(3));
    assert_eq!(series[1].date, d(6));
}
