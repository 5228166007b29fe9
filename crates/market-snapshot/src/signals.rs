//! Trend classification, trade signal and risk levels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stop distance in ATRs
pub const STOP_ATR_MULTIPLIER: f64 = 1.5;
/// Target distance in ATRs; always twice the stop distance
pub const TARGET_ATR_MULTIPLIER: f64 = 3.0;

/// Coarse trend from price against both moving averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Up,
    Down,
    Sideways,
}

impl Trend {
    /// UP only when strictly above both averages, DOWN only when strictly
    /// below both; every other arrangement (including NaN) is SIDEWAYS.
    pub fn classify(price: f64, sma_short: f64, sma_long: f64) -> Self {
        if price > sma_short && price > sma_long {
            Self::Up
        } else if price < sma_short && price < sma_long {
            Self::Down
        } else {
            Self::Sideways
        }
    }

    pub fn signal(self) -> Signal {
        match self {
            Self::Up => Signal::Buy,
            Self::Down => Signal::Sell,
            Self::Sideways => Signal::Wait,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Sideways => "SIDEWAYS",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trade signal, one per trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Wait,
}

impl Signal {
    pub fn label(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Wait => "WAIT",
        }
    }

    pub fn is_actionable(self) -> bool {
        !matches!(self, Self::Wait)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exit levels for a hypothetical position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl RiskLevels {
    /// Distance from entry to the stop
    pub fn risk(&self, price: f64) -> f64 {
        (price - self.stop_loss).abs()
    }

    /// Distance from entry to the target
    pub fn reward(&self, price: f64) -> f64 {
        (self.take_profit - price).abs()
    }
}

/// Trend, signal and levels decided for one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeSetup {
    pub trend: Trend,
    pub signal: Signal,
    pub levels: Option<RiskLevels>,
}

impl TradeSetup {
    /// Classify the trend and size stop/target from ATR
    ///
    /// Levels exist only for BUY and SELL.
    pub fn from_indicators(price: f64, sma_short: f64, sma_long: f64, atr: f64) -> Self {
        let trend = Trend::classify(price, sma_short, sma_long);
        let signal = trend.signal();

        let risk = STOP_ATR_MULTIPLIER * atr;
        let reward = TARGET_ATR_MULTIPLIER * atr;
        let levels = match signal {
            Signal::Buy => Some(RiskLevels {
                stop_loss: price - risk,
                take_profit: price + reward,
            }),
            Signal::Sell => Some(RiskLevels {
                stop_loss: price + risk,
                take_profit: price - reward,
            }),
            Signal::Wait => None,
        };

        Self {
            trend,
            signal,
            levels,
        }
    }
}
