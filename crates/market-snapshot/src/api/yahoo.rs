//! Yahoo Finance provider
//!
//! Price history goes through `yahoo_finance_api`; headlines come from the
//! Yahoo search endpoint, which that crate does not expose in the raw shape
//! we need.

use crate::api::MarketDataProvider;
use crate::config::SnapshotConfig;
use crate::error::{Result, SnapshotError};
use crate::news::NewsItem;
use crate::series::{Bar, PriceSeries};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";

/// Yahoo Finance client
///
/// The chart connector and the search client share one timeout and user agent.
#[derive(Clone)]
pub struct YahooFinanceClient {
    connector: Arc<yahoo::YahooConnector>,
    http: Client,
    request_timeout: Duration,
}

impl fmt::Debug for YahooFinanceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YahooFinanceClient")
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

impl YahooFinanceClient {
    /// Create a client using the timeout and user agent from `config`
    pub fn new(config: &SnapshotConfig) -> Result<Self> {
        let connector = yahoo::YahooConnector::builder()
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| SnapshotError::YahooFinanceError(e.to_string()))?;
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            connector: Arc::new(connector),
            http,
            request_timeout: config.request_timeout,
        })
    }

    /// Timeout applied to every history and news request
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Daily bars between `start` and `end`
    pub async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceSeries> {
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp()).map_err(|e| {
            SnapshotError::YahooFinanceError(format!("Invalid start timestamp: {e}"))
        })?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| SnapshotError::YahooFinanceError(format!("Invalid end timestamp: {e}")))?;

        let response = self
            .connector
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| SnapshotError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| SnapshotError::YahooFinanceError(e.to_string()))?;

        let bars = quotes
            .iter()
            .filter_map(|q| {
                let timestamp = DateTime::from_timestamp(q.timestamp as i64, 0)?;
                Some(Bar {
                    timestamp,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: q.volume as f64,
                })
            })
            .collect();

        Ok(PriceSeries::new(symbol, bars))
    }

    /// Daily bars for a named lookback window ending now
    pub async fn get_historical_range(&self, symbol: &str, range: &str) -> Result<PriceSeries> {
        let end = Utc::now();
        let start = range_start(range, end)?;
        self.get_historical_quotes(symbol, start, end).await
    }

    /// Raw news items from the search endpoint
    pub async fn get_news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(SEARCH_URL)
            .query(&[
                ("q", symbol),
                ("quotesCount", "0"),
                ("newsCount", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SnapshotError::YahooFinanceError(format!(
                "News search failed with {status}: {body}"
            )));
        }

        let body: SearchResponse = response.json().await?;
        debug!(symbol, items = body.news.len(), "Fetched news items");
        Ok(body.news)
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    async fn price_history(&self, symbol: &str, range: &str) -> Result<PriceSeries> {
        self.get_historical_range(symbol, range).await
    }

    async fn recent_news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>> {
        let mut news = self.get_news(symbol, limit).await?;
        news.truncate(limit);
        Ok(news)
    }
}

/// Start of a named lookback window
pub fn range_start(range: &str, end: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let start = match range {
        "1d" => end - TimeDelta::days(1),
        "5d" => end - TimeDelta::days(5),
        "1mo" => end - TimeDelta::days(30),
        "3mo" => end - TimeDelta::days(90),
        "6mo" => end - TimeDelta::days(180),
        "1y" => end - TimeDelta::days(365),
        "2y" => end - TimeDelta::days(730),
        "5y" => end - TimeDelta::days(1825),
        "10y" => end - TimeDelta::days(3650),
        "ytd" => NaiveDate::from_ymd_opt(end.year(), 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or_else(|| SnapshotError::ConfigError(format!("Invalid year: {}", end.year())))?,
        "max" => end - TimeDelta::days(36500),
        _ => {
            return Err(SnapshotError::ConfigError(format!(
                "Invalid range: {range}"
            )));
        }
    };
    Ok(start)
}
