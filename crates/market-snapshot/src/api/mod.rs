//! Market-data providers

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use crate::error::Result;
use crate::news::NewsItem;
use crate::series::PriceSeries;
use async_trait::async_trait;

/// Source of price history and headlines for a ticker
///
/// Implementations report an unknown ticker either as an error or as an empty
/// series; the pipeline treats both as failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars covering `range` (e.g. `"6mo"`) up to now
    async fn price_history(&self, symbol: &str, range: &str) -> Result<PriceSeries>;

    /// Most recent news items, at most `limit`
    async fn recent_news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>>;
}
