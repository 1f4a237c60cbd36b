use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Could not parse holdings: no usable (symbol, weight) pairs")]
    EmptyHoldings,

    #[error("No preset is configured (not even the default)")]
    NoPresetConfigured,
}
