use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("Market data error during backtest: {0}")]
    MarketData(#[from] market_data::MarketDataError),
}
