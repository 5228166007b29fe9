//! Market snapshot
//!
//! One-shot technical snapshot of a single market instrument. For a ticker
//! symbol the pipeline:
//!
//! - resolves friendly aliases (`GOLD`, `EURUSD`, `GBPUSD`) to provider tickers
//! - fetches about six months of daily bars from Yahoo Finance
//! - computes Wilder RSI(14), SMA(20), SMA(50) and Wilder ATR(14)
//! - classifies the trend and derives a BUY/SELL/WAIT signal with
//!   ATR-scaled stop-loss and take-profit levels
//! - attaches up to three recent headlines
//! - renders a copy-paste prompt for an external AI assistant
//!
//! Any failure in the price path fails the whole run. News failures only
//! degrade the headline list to a placeholder.
//!
//! # Example
//!
//! ```rust,ignore
//! use market_snapshot::{AnalysisPrompt, MarketAnalyzer, SnapshotConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SnapshotConfig::default();
//!     let language = config.language.clone();
//!     let analyzer = MarketAnalyzer::yahoo(Arc::new(config))?;
//!
//!     let result = analyzer.analyze("gold").await?;
//!     println!("{}", result.summary());
//!     println!("{}", AnalysisPrompt::new()?.render(&result, &language)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod indicators;
pub mod news;
pub mod prompts;
pub mod series;
pub mod signals;
pub mod symbol;

pub use api::{MarketDataProvider, YahooFinanceClient};
pub use config::SnapshotConfig;
pub use engine::{AnalysisResult, MarketAnalyzer};
pub use error::{Result, SnapshotError};
pub use formatter::{Formatter, JsonFormatter, OutputFormat, TextFormatter};
pub use indicators::{IndicatorSnapshot, RsiZone};
pub use news::NewsItem;
pub use prompts::AnalysisPrompt;
pub use series::{Bar, PriceSeries};
pub use signals::{RiskLevels, Signal, TradeSetup, Trend};

pub use snapshot_prompt::Language;
