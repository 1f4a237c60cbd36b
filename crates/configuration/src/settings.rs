use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub backtest: BacktestSettings,
    pub market_data: MarketDataSettings,
    pub benchmarks: Vec<Benchmark>,
    pub presets: BTreeMap<String, Preset>,
}

/// Contains parameters for a portfolio backtest session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSettings {
    /// Trailing window, in provider days, for the full backtest (~15 trading years).
    pub default_days: u32,
    /// Hypothetical starting amount for the horizon what-if rows.
    pub investment: f64,
    /// Preset used when a request names none (or an unknown code).
    pub default_preset: String,
    /// Fixed trading-day horizons reported alongside the full series.
    pub horizons: Vec<Horizon>,
}

/// A fixed trailing window of trading days, e.g. "5y" = 1260.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Horizon {
    pub label: String,
    pub days: usize,
}

/// A single-symbol benchmark the portfolio is compared against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benchmark {
    pub code: String,
    pub label: String,
    pub symbol: String,
}

/// A named, ready-made allocation the user can pick instead of entering
/// holdings by hand. Weights are raw and normalized at request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub label: String,
    pub holdings: Vec<Holding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub weight: f64,
}

/// Contains tuning for the market-data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataSettings {
    pub stooq_base_url: String,
    pub coingecko_base_url: String,
    /// How long a fetched price history stays cached.
    pub history_ttl_seconds: u64,
}

impl Settings {
    /// Resolves a preset code, falling back to the configured default when
    /// the code is unknown. `None` only when the configuration itself is
    /// broken (no default preset either).
    pub fn preset_or_default(&self, code: &str) -> Option<&Preset> {
        self.presets
            .get(code)
            .or_else(|| self.presets.get(&self.backtest.default_preset))
    }
}

impl Default for Settings {
    fn default() -> Self {
        // Stooq US symbols are usually like "smh.us" or "aapl.us".
        let presets: BTreeMap<String, Preset> = [
            ("semi", "Semiconductors", "smh.us"),
            ("banking", "Banking", "xlf.us"),
            ("energy", "Energy", "xle.us"),
            ("green", "Green energy", "icln.us"),
            ("staples", "Consumer staples", "xlp.us"),
            ("healthcare", "Healthcare", "xlv.us"),
        ]
        .into_iter()
        .map(|(code, label, symbol)| {
            (
                code.to_string(),
                Preset {
                    label: label.to_string(),
                    holdings: vec![Holding {
                        symbol: symbol.to_string(),
                        weight: 1.0,
                    }],
                },
            )
        })
        .collect();

        Self {
            backtest: BacktestSettings {
                default_days: 4200,
                investment: 10_000.0,
                default_preset: "semi".to_string(),
                horizons: vec![
                    Horizon {
                        label: "5y".to_string(),
                        days: 1260,
                    },
                    Horizon {
                        label: "10y".to_string(),
                        days: 2520,
                    },
                    Horizon {
                        label: "15y".to_string(),
                        days: 3780,
                    },
                ],
            },
            market_data: MarketDataSettings {
                stooq_base_url: "https://stooq.com".to_string(),
                coingecko_base_url: "https://api.coingecko.com".to_string(),
                history_ttl_seconds: 6 * 60 * 60,
            },
            // More reliable single-ETF proxies for the headline indexes.
            benchmarks: vec![
                Benchmark {
                    code: "spx".to_string(),
                    label: "S&P 500".to_string(),
                    symbol: "spy.us".to_string(),
                },
                Benchmark {
                    code: "ndx".to_string(),
                    label: "Nasdaq 100".to_string(),
                    symbol: "qqq.us".to_string(),
                },
            ],
            presets,
        }
    }
}
