use crate::error::MarketDataError;
use crate::{MAX_HISTORY_DAYS, PriceHistoryProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::PricePoint;

/// A client for Stooq's free daily-history CSV endpoint.
///
/// Symbols follow Stooq conventions: US tickers like `spy.us`, indexes
/// like `^spx`. Availability varies by symbol; treat results as
/// best-effort.
pub struct StooqClient {
    client: reqwest::Client,
    base_url: String,
}

impl StooqClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PriceHistoryProvider for StooqClient {
    async fn fetch_history(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, MarketDataError> {
        // i=d for daily candles.
        let url = format!("{}/q/d/l/", self.base_url);
        let text = self
            .client
            .get(&url)
            .query(&[("s", symbol), ("i", "d")])
            .send()
            .await?
            .text()
            .await?;

        Ok(parse_daily_history(&text, days))
    }
}

/// Decodes a Stooq daily CSV payload (`Date,Open,High,Low,Close,Volume`)
/// into ascending price points, keeping the trailing `max(2, days)` rows.
///
/// Anything that is not that CSV (the "no data" page for an unknown
/// symbol, an HTML error body) decodes to zero rows, which is exactly
/// the "symbol not found" signal the provider contract requires.
pub fn parse_daily_history(text: &str, days: u32) -> Vec<PricePoint> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let Ok(headers) = reader.headers() else {
        return Vec::new();
    };
    let date_idx = headers.iter().position(|h| h == "Date");
    let close_idx = headers.iter().position(|h| h == "Close");
    let (Some(date_idx), Some(close_idx)) = (date_idx, close_idx) else {
        return Vec::new();
    };

    let rows: Vec<csv::StringRecord> = reader.records().filter_map(Result::ok).collect();
    let keep = rows.len().saturating_sub(days.clamp(2, MAX_HISTORY_DAYS) as usize);

    let mut out: Vec<PricePoint> = Vec::new();
    for row in &rows[keep..] {
        let date = row.get(date_idx).unwrap_or("").trim();
        let close = row.get(close_idx).unwrap_or("").trim();
        if date.is_empty() || close.is_empty() || close == "N/A" {
            continue;
        }
        let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
            continue;
        };
        let Ok(close) = close.parse::<f64>() else {
            continue;
        };
        out.push(PricePoint {
            date,
            price: Some(close),
        });
    }

    out.sort_by_key(|point| point.date);
    out
}
