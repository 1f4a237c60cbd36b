use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP request to the quote provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to deserialize the provider response: {0}")]
    Deserialization(String),

    #[error("Invalid data from provider: {0}")]
    InvalidData(String),
}
