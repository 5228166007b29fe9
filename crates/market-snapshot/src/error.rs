//! Error types for snapshot operations

use thiserror::Error;

/// Everything that can make an analysis fail
///
/// The pipeline never returns a partial result: any of these collapses the
/// whole run. News retrieval errors are the exception and never surface here.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Invalid ticker symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Provider returned no usable price history
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Too few bars to warm up the longest indicator window
    #[error("Insufficient history for {symbol}: need {required} bars, got {available}")]
    InsufficientHistory {
        symbol: String,
        required: usize,
        available: usize,
    },

    /// Latest close is not a positive finite number
    #[error("Invalid price for {symbol}: {price}")]
    InvalidPrice { symbol: String, price: f64 },

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Technical indicator calculation error
    #[error("Technical indicator error: {0}")]
    IndicatorError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Prompt rendering error
    #[error("Prompt error: {0}")]
    PromptError(#[from] snapshot_prompt::PromptError),
}

/// Result type alias for snapshot operations
pub type Result<T> = std::result::Result<T, SnapshotError>;

impl From<ta::errors::TaError> for SnapshotError {
    fn from(err: ta::errors::TaError) -> Self {
        SnapshotError::IndicatorError(err.to_string())
    }
}
