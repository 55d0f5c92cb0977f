use thiserror::Error;

/// Validation and contract errors exposed by `coinprice-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid exchange '{value}', expected one of binance, upbit, bithumb, coinbase")]
    InvalidExchange { value: String },

    #[error("exchange rate must be positive and finite: {value}")]
    InvalidRate { value: f64 },
    #[error("call timeout must be greater than zero")]
    ZeroTimeout,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
