use crate::error::MarketDataError;
use crate::PriceHistoryProvider;
use async_trait::async_trait;
use chrono::DateTime;
use core_types::PricePoint;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A client for CoinGecko's public market-chart endpoint.
///
/// Symbols are CoinGecko coin ids ("bitcoin", "ethereum"). The chart
/// returns intraday samples for short windows; they are collapsed to one
/// point per UTC date, keeping the last sample of each day.
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    // Absent on error payloads ({"error": ...}), which must read as an
    // unknown symbol rather than a failure.
    #[serde(default)]
    prices: Vec<(f64, Option<f64>)>,
}

impl CoinGeckoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PriceHistoryProvider for CoinGeckoClient {
    async fn fetch_history(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, MarketDataError> {
        let url = format!("{}/api/v3/coins/{}/market_chart", self.base_url, symbol);
        let days_param = days.to_string();
        let chart = self
            .client
            .get(&url)
            .query(&[("vs_currency", "usd"), ("days", days_param.as_str())])
            .send()
            .await?
            .json::<MarketChartResponse>()
            .await?;

        Ok(daily_points_from_chart(&chart.prices))
    }
}

/// Collapses millisecond-timestamped samples to one ascending point per
/// UTC date (last sample wins). Malformed samples are skipped per-item.
pub fn daily_points_from_chart(samples: &[(f64, Option<f64>)]) -> Vec<PricePoint> {
    let mut by_date: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
    for &(ts_ms, price) in samples {
        let Some(price) = price else {
            continue;
        };
        let Some(when) = DateTime::from_timestamp_millis(ts_ms as i64) else {
            continue;
        };
        by_date.insert(when.date_naive(), price);
    }

    by_date
        .into_iter()
        .map(|(date, price)| PricePoint {
            date,
            price: Some(price),
        })
        .collect()
}
