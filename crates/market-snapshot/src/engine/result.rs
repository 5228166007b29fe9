//! Analysis result record

use crate::indicators::{IndicatorSnapshot, RsiZone};
use crate::signals::{RiskLevels, Signal, TradeSetup, Trend};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one successful pipeline run produces
///
/// Built fresh per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Normalized provider ticker
    pub symbol: String,
    /// Latest close
    pub price: f64,
    pub rsi: f64,
    pub rsi_zone: RsiZone,
    pub trend: Trend,
    pub signal: Signal,
    /// Present only when `signal` is BUY or SELL
    pub stop_loss: Option<f64>,
    /// Present only when `signal` is BUY or SELL
    pub take_profit: Option<f64>,
    pub indicators: IndicatorSnapshot,
    /// One to three headlines, or a single placeholder
    pub news: Vec<String>,
    /// Bars the indicators were computed over
    pub bars: usize,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        indicators: IndicatorSnapshot,
        setup: TradeSetup,
        news: Vec<String>,
        bars: usize,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            rsi: indicators.rsi,
            rsi_zone: RsiZone::classify(indicators.rsi),
            trend: setup.trend,
            signal: setup.signal,
            stop_loss: setup.levels.map(|l| l.stop_loss),
            take_profit: setup.levels.map(|l| l.take_profit),
            indicators,
            news,
            bars,
            generated_at: Utc::now(),
        }
    }

    /// Stop and target together, when the signal calls for a position
    pub fn risk_levels(&self) -> Option<RiskLevels> {
        Some(RiskLevels {
            stop_loss: self.stop_loss?,
            take_profit: self.take_profit?,
        })
    }

    /// One-line summary for logs and headers
    pub fn summary(&self) -> String {
        format!(
            "{} {:.4} | RSI {:.1} | {} | {}",
            self.symbol, self.price, self.rsi, self.trend, self.signal
        )
    }
}
