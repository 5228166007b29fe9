//! The analysis pipeline
//!
//! normalize → history → indicators → trend/signal → risk levels → news.
//! Every step except news propagates its error and aborts the run; news has
//! its own boundary and degrades to a placeholder headline instead.

use crate::api::{MarketDataProvider, YahooFinanceClient};
use crate::config::SnapshotConfig;
use crate::error::{Result, SnapshotError};
use crate::indicators::IndicatorSnapshot;
use crate::news::headlines_or_placeholder;
use crate::signals::TradeSetup;
use crate::symbol::normalize_symbol;
use std::sync::Arc;
use tracing::{info, instrument};

use super::result::AnalysisResult;

/// Runs one snapshot per call against an injected provider
///
/// Holds no state between calls; two runs never share data.
pub struct MarketAnalyzer<P = YahooFinanceClient> {
    provider: P,
    config: Arc<SnapshotConfig>,
}

impl MarketAnalyzer<YahooFinanceClient> {
    /// Analyzer backed by Yahoo Finance
    pub fn yahoo(config: Arc<SnapshotConfig>) -> Result<Self> {
        let provider = YahooFinanceClient::new(&config)?;
        Ok(Self::new(provider, config))
    }
}

impl<P: MarketDataProvider> MarketAnalyzer<P> {
    pub fn new(provider: P, config: Arc<SnapshotConfig>) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Produce a full snapshot for `raw_symbol`, or fail as a whole
    #[instrument(skip(self))]
    pub async fn analyze(&self, raw_symbol: &str) -> Result<AnalysisResult> {
        let symbol = normalize_symbol(raw_symbol)?;
        info!(%symbol, range = %self.config.history_range, "Fetching price history");

        let series = self
            .provider
            .price_history(&symbol, &self.config.history_range)
            .await?;

        if series.is_empty() {
            return Err(SnapshotError::DataUnavailable {
                symbol,
                reason: "empty price history".to_string(),
            });
        }
        if series.len() < self.config.min_history_bars {
            return Err(SnapshotError::InsufficientHistory {
                symbol,
                required: self.config.min_history_bars,
                available: series.len(),
            });
        }

        let price = series.latest().map_or(f64::NAN, |bar| bar.close);
        if !(price.is_finite() && price > 0.0) {
            return Err(SnapshotError::InvalidPrice { symbol, price });
        }

        let indicators = IndicatorSnapshot::compute(&series)?;
        let setup = TradeSetup::from_indicators(
            price,
            indicators.sma_short,
            indicators.sma_long,
            indicators.atr,
        );

        let news = self.headlines(&symbol).await;

        let result = AnalysisResult::new(symbol, price, indicators, setup, news, series.len());
        info!(summary = %result.summary(), "Analysis complete");
        Ok(result)
    }

    /// News with its own failure boundary; always non-empty
    async fn headlines(&self, symbol: &str) -> Vec<String> {
        let fetched = self
            .provider
            .recent_news(symbol, self.config.news_limit)
            .await;
        headlines_or_placeholder(fetched, self.config.news_limit)
    }
}
