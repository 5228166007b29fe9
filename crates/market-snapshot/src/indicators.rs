//! Technical indicators over a [`PriceSeries`]
//!
//! Simple moving averages come straight from the `ta` crate. RSI and ATR use
//! Wilder smoothing (seeded with a plain mean of the first `period` inputs,
//! then `avg = (avg * (n - 1) + x) / n`), which `ta`'s EMA-based versions do
//! not implement, so they are provided here as `ta`-style streaming indicators.
//!
//! Streaming indicators yield `None` until their window is warm.

use crate::error::{Result, SnapshotError};
use crate::series::PriceSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use ta::errors::TaError;
use ta::indicators::{SimpleMovingAverage, TrueRange};
use ta::{Close, High, Low, Next, Period, Reset};
use tracing::debug;

pub const RSI_PERIOD: usize = 14;
pub const SMA_SHORT_PERIOD: usize = 20;
pub const SMA_LONG_PERIOD: usize = 50;
pub const ATR_PERIOD: usize = 14;

/// Wilder's running average
#[derive(Debug, Clone)]
pub struct WilderAverage {
    period: usize,
    seen: usize,
    sum: f64,
    current: Option<f64>,
}

impl WilderAverage {
    pub fn new(period: usize) -> ta::errors::Result<Self> {
        if period == 0 {
            return Err(TaError::InvalidParameter);
        }
        Ok(Self {
            period,
            seen: 0,
            sum: 0.0,
            current: None,
        })
    }
}

impl Period for WilderAverage {
    fn period(&self) -> usize {
        self.period
    }
}

impl Next<f64> for WilderAverage {
    type Output = Option<f64>;

    fn next(&mut self, input: f64) -> Self::Output {
        let n = self.period as f64;
        self.current = match self.current {
            Some(avg) => Some((avg * (n - 1.0) + input) / n),
            None => {
                self.seen += 1;
                self.sum += input;
                (self.seen == self.period).then(|| self.sum / n)
            }
        };
        self.current
    }
}

impl Reset for WilderAverage {
    fn reset(&mut self) {
        self.seen = 0;
        self.sum = 0.0;
        self.current = None;
    }
}

impl fmt::Display for WilderAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RMA({})", self.period)
    }
}

/// Relative strength index with Wilder smoothing, on a 0..=100 scale
#[derive(Debug, Clone)]
pub struct WilderRsi {
    period: usize,
    prev_close: Option<f64>,
    avg_gain: WilderAverage,
    avg_loss: WilderAverage,
}

impl WilderRsi {
    pub fn new(period: usize) -> ta::errors::Result<Self> {
        Ok(Self {
            period,
            prev_close: None,
            avg_gain: WilderAverage::new(period)?,
            avg_loss: WilderAverage::new(period)?,
        })
    }
}

impl Period for WilderRsi {
    fn period(&self) -> usize {
        self.period
    }
}

impl Next<f64> for WilderRsi {
    type Output = Option<f64>;

    fn next(&mut self, close: f64) -> Self::Output {
        let prev = self.prev_close.replace(close)?;
        let change = close - prev;

        let gain = self.avg_gain.next(change.max(0.0));
        let loss = self.avg_loss.next((-change).max(0.0));

        match (gain, loss) {
            (Some(gain), Some(loss)) => Some(rsi_from_averages(gain, loss)),
            _ => None,
        }
    }
}

impl<T: Close> Next<&T> for WilderRsi {
    type Output = Option<f64>;

    fn next(&mut self, input: &T) -> Self::Output {
        self.next(input.close())
    }
}

impl Reset for WilderRsi {
    fn reset(&mut self) {
        self.prev_close = None;
        self.avg_gain.reset();
        self.avg_loss.reset();
    }
}

impl fmt::Display for WilderRsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RSI({})", self.period)
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // flat window reads as neutral, a loss-free one as maximal strength
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Average true range with Wilder smoothing
///
/// The first bar's true range is its high-low span, as in `ta::TrueRange`.
#[derive(Debug, Clone)]
pub struct WilderAtr {
    true_range: TrueRange,
    average: WilderAverage,
}

impl WilderAtr {
    pub fn new(period: usize) -> ta::errors::Result<Self> {
        Ok(Self {
            true_range: TrueRange::new(),
            average: WilderAverage::new(period)?,
        })
    }
}

impl Period for WilderAtr {
    fn period(&self) -> usize {
        self.average.period()
    }
}

impl<T: High + Low + Close> Next<&T> for WilderAtr {
    type Output = Option<f64>;

    fn next(&mut self, bar: &T) -> Self::Output {
        let tr = self.true_range.next(bar);
        self.average.next(tr)
    }
}

impl Reset for WilderAtr {
    fn reset(&mut self) {
        self.true_range.reset();
        self.average.reset();
    }
}

impl fmt::Display for WilderAtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ATR({})", self.average.period())
    }
}

/// Indicator values read from the most recent bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub sma_short: f64,
    pub sma_long: f64,
    pub atr: f64,
}

impl IndicatorSnapshot {
    /// Run every indicator over the whole series and keep the last values
    ///
    /// Fails when the series is shorter than the longest window, since the
    /// long average would otherwise be computed over a partial window.
    pub fn compute(series: &PriceSeries) -> Result<Self> {
        if series.len() < SMA_LONG_PERIOD {
            return Err(SnapshotError::InsufficientHistory {
                symbol: series.symbol().to_string(),
                required: SMA_LONG_PERIOD,
                available: series.len(),
            });
        }

        let mut rsi = WilderRsi::new(RSI_PERIOD)?;
        let mut sma_short = SimpleMovingAverage::new(SMA_SHORT_PERIOD)?;
        let mut sma_long = SimpleMovingAverage::new(SMA_LONG_PERIOD)?;
        let mut atr = WilderAtr::new(ATR_PERIOD)?;

        let mut last = (None, 0.0, 0.0, None);
        for bar in series.bars() {
            last = (
                rsi.next(bar),
                sma_short.next(bar.close),
                sma_long.next(bar.close),
                atr.next(bar),
            );
        }

        let (rsi_value, sma_short_value, sma_long_value, atr_value) = last;
        let snapshot = Self {
            rsi: require(rsi_value, &rsi)?,
            sma_short: sma_short_value,
            sma_long: sma_long_value,
            atr: require(atr_value, &atr)?,
        };
        snapshot.ensure_finite()?;

        debug!(
            symbol = series.symbol(),
            rsi = snapshot.rsi,
            sma_short = snapshot.sma_short,
            sma_long = snapshot.sma_long,
            atr = snapshot.atr,
            "Indicators computed"
        );

        Ok(snapshot)
    }

    fn ensure_finite(&self) -> Result<()> {
        let values = [
            ("RSI", self.rsi),
            ("SMA short", self.sma_short),
            ("SMA long", self.sma_long),
            ("ATR", self.atr),
        ];
        match values.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, value)) => Err(SnapshotError::IndicatorError(format!(
                "{name} is not finite: {value}"
            ))),
            None => Ok(()),
        }
    }
}

fn require(value: Option<f64>, indicator: &impl fmt::Display) -> Result<f64> {
    value.ok_or_else(|| SnapshotError::IndicatorError(format!("{indicator} is still warming up")))
}

/// RSI zone used for the colored RSI line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsiZone {
    /// Above 70
    Overbought,
    /// Below 30
    Oversold,
    Neutral,
}

impl RsiZone {
    pub fn classify(rsi: f64) -> Self {
        if rsi > 70.0 {
            Self::Overbought
        } else if rsi < 30.0 {
            Self::Oversold
        } else {
            Self::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overbought => "Overbought",
            Self::Oversold => "Oversold",
            Self::Neutral => "Neutral",
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::series::Bar;
    use chrono::DateTime;

    const TOLERANCE: f64 = 1e-9;

    /// Daily bars with the given closes and a fixed half-span around each close
    pub(crate) fn series_from_closes(symbol: &str, closes: &[f64], half_span: f64) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: DateTime::from_timestamp(1_700_000_000 + i as i64 * 86_400, 0)
                    .unwrap(),
                open: close,
                high: close + half_span,
                low: close - half_span,
                close,
                volume: 10_000.0,
            })
            .collect();
        PriceSeries::new(symbol, bars)
    }

    #[test]
    fn test_wilder_average_seed_and_smoothing() {
        let mut avg = WilderAverage::new(3).unwrap();
        assert_eq!(avg.next(1.0), None);
        assert_eq!(avg.next(2.0), None);
        assert_eq!(avg.next(3.0), Some(2.0));
        // (2 * 2 + 5) / 3
        assert_eq!(avg.next(5.0), Some(3.0));

        avg.reset();
        assert_eq!(avg.next(9.0), None);
        assert!(WilderAverage::new(0).is_err());
    }

    #[test]
    fn test_rsi_bounds_for_monotonic_series() {
        let mut rising = WilderRsi::new(14).unwrap();
        let mut last = None;
        for i in 0..30 {
            last = rising.next(f64::from(i));
        }
        assert_eq!(last, Some(100.0));

        let mut falling = WilderRsi::new(14).unwrap();
        for i in 0..30 {
            last = falling.next(f64::from(100 - i));
        }
        assert_eq!(last, Some(0.0));
    }

    #[test]
    fn test_rsi_flat_series_is_neutral() {
        let mut rsi = WilderRsi::new(14).unwrap();
        let mut last = None;
        for _ in 0..20 {
            last = rsi.next(42.0);
        }
        assert_eq!(last, Some(50.0));
    }

    #[test]
    fn test_rsi_needs_period_plus_one_closes() {
        let mut rsi = WilderRsi::new(3).unwrap();
        assert_eq!(rsi.next(1.0), None);
        assert_eq!(rsi.next(2.0), None);
        assert_eq!(rsi.next(1.0), None);
        // changes +1, -1, +1: gain 2/3, loss 1/3, rs 2
        let value = rsi.next(2.0).unwrap();
        assert!((value - 100.0 * 2.0 / 3.0).abs() < TOLERANCE);
        assert_eq!(rsi.to_string(), "RSI(3)");
    }

    #[test]
    fn test_atr_constant_span() {
        let series = series_from_closes("X", &[10.0; 20], 1.0);
        let mut atr = WilderAtr::new(14).unwrap();
        let mut last = None;
        for bar in series.bars() {
            last = atr.next(bar);
        }
        assert!((last.unwrap() - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_atr_uses_gap_from_previous_close() {
        let series = series_from_closes("X", &[10.0, 20.0], 1.0);
        let mut atr = WilderAtr::new(2).unwrap();
        assert_eq!(atr.next(&series.bars()[0]), None);
        // tr1 = 2, tr2 = max(2, |21 - 10|, |19 - 10|) = 11
        let value = atr.next(&series.bars()[1]).unwrap();
        assert!((value - 6.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_snapshot_on_rising_series() {
        let closes: Vec<f64> = (41..=100).map(f64::from).collect();
        let series = series_from_closes("UP", &closes, 1.0);

        let snapshot = IndicatorSnapshot::compute(&series).unwrap();
        assert!((snapshot.sma_short - 90.5).abs() < TOLERANCE);
        assert!((snapshot.sma_long - 75.5).abs() < TOLERANCE);
        assert!((snapshot.atr - 2.0).abs() < TOLERANCE);
        assert_eq!(snapshot.rsi, 100.0);
    }

    #[test]
    fn test_snapshot_requires_long_window() {
        let closes: Vec<f64> = (0..49).map(f64::from).collect();
        let series = series_from_closes("SHORT", &closes, 1.0);

        let err = IndicatorSnapshot::compute(&series).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::InsufficientHistory {
                required: 50,
                available: 49,
                ..
            }
        ));
    }

    #[test]
    fn test_snapshot_rejects_non_finite_values() {
        let mut closes: Vec<f64> = (0..60).map(f64::from).collect();
        closes[59] = f64::NAN;
        let series = series_from_closes("NAN", &closes, 1.0);

        assert!(matches!(
            IndicatorSnapshot::compute(&series),
            Err(SnapshotError::IndicatorError(_))
        ));
    }

    #[test]
    fn test_rsi_zone() {
        assert_eq!(RsiZone::classify(75.0), RsiZone::Overbought);
        assert_eq!(RsiZone::classify(25.0), RsiZone::Oversold);
        assert_eq!(RsiZone::classify(50.0), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(70.0), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(30.0), RsiZone::Neutral);
    }
}
