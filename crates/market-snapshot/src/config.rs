//! Configuration for snapshot operations

use crate::error::{Result, SnapshotError};
use crate::indicators::SMA_LONG_PERIOD;
use serde::{Deserialize, Serialize};
use snapshot_prompt::Language;
use std::time::Duration;

/// Lookback windows the Yahoo provider understands
pub const SUPPORTED_RANGES: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

/// Upper bound on headlines requested from the provider
pub const MAX_NEWS_LIMIT: usize = 10;

/// Configuration for a snapshot run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Lookback window for the daily price history
    pub history_range: String,

    /// Number of headlines to request
    pub news_limit: usize,

    /// Fewest bars accepted before indicators are considered meaningful
    pub min_history_bars: usize,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// User agent sent to the news endpoint
    pub user_agent: String,

    /// Language of the copy-paste prompt
    pub language: Language,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            history_range: "6mo".to_string(),
            news_limit: 3,
            min_history_bars: SMA_LONG_PERIOD,
            request_timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (compatible; market-snapshot)".to_string(),
            language: Language::English,
        }
    }
}

impl SnapshotConfig {
    /// Create a new configuration builder
    pub fn builder() -> SnapshotConfigBuilder {
        SnapshotConfigBuilder::default()
    }

    /// Apply `SNAPSHOT_RANGE`, `SNAPSHOT_LANG` and `SNAPSHOT_TIMEOUT_SECS`
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(range) = std::env::var("SNAPSHOT_RANGE") {
            self.history_range = range;
        }
        if let Ok(lang) = std::env::var("SNAPSHOT_LANG") {
            self.language = Language::from_code(&lang);
        }
        if let Ok(secs) = std::env::var("SNAPSHOT_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                SnapshotError::ConfigError(format!("SNAPSHOT_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            self.request_timeout = Duration::from_secs(secs);
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_RANGES.contains(&self.history_range.as_str()) {
            return Err(SnapshotError::ConfigError(format!(
                "Unsupported history range '{}'. Supported: {}",
                self.history_range,
                SUPPORTED_RANGES.join(", ")
            )));
        }

        if self.news_limit == 0 || self.news_limit > MAX_NEWS_LIMIT {
            return Err(SnapshotError::ConfigError(format!(
                "news_limit must be between 1 and {MAX_NEWS_LIMIT}"
            )));
        }

        if self.min_history_bars < SMA_LONG_PERIOD {
            return Err(SnapshotError::ConfigError(format!(
                "min_history_bars must be at least {SMA_LONG_PERIOD}"
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(SnapshotError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for SnapshotConfig
#[derive(Debug, Default)]
pub struct SnapshotConfigBuilder {
    history_range: Option<String>,
    news_limit: Option<usize>,
    min_history_bars: Option<usize>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    language: Option<Language>,
}

impl SnapshotConfigBuilder {
    pub fn history_range(mut self, range: impl Into<String>) -> Self {
        self.history_range = Some(range.into());
        self
    }

    pub fn news_limit(mut self, limit: usize) -> Self {
        self.news_limit = Some(limit);
        self
    }

    pub fn min_history_bars(mut self, bars: usize) -> Self {
        self.min_history_bars = Some(bars);
        self
    }

    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SnapshotConfig> {
        let defaults = SnapshotConfig::default();

        let config = SnapshotConfig {
            history_range: self.history_range.unwrap_or(defaults.history_range),
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
            min_history_bars: self.min_history_bars.unwrap_or(defaults.min_history_bars),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            language: self.language.unwrap_or(defaults.language),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SnapshotConfig::default();
        assert_eq!(config.history_range, "6mo");
        assert_eq!(config.news_limit, 3);
        assert_eq!(config.min_history_bars, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SnapshotConfig::builder()
            .history_range("1y")
            .language(Language::Russian)
            .request_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.history_range, "1y");
        assert_eq!(config.language, Language::Russian);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_validation_rejects_unknown_range() {
        let result = SnapshotConfig::builder().history_range("7w").build();
        assert!(matches!(result, Err(SnapshotError::ConfigError(_))));
    }

    #[test]
    fn test_validation_rejects_short_warmup() {
        let config = SnapshotConfig {
            min_history_bars: 20,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_news_limit_bounds() {
        assert!(SnapshotConfig::builder().news_limit(0).build().is_err());
        assert!(SnapshotConfig::builder().news_limit(11).build().is_err());
        assert!(SnapshotConfig::builder().news_limit(10).build().is_ok());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = SnapshotConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    /// Env-reading tests share process state
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    const ENV_KEYS: [&str; 3] = ["SNAPSHOT_RANGE", "SNAPSHOT_LANG", "SNAPSHOT_TIMEOUT_SECS"];

    fn clear_env() {
        for key in ENV_KEYS {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        unsafe {
            std::env::set_var("SNAPSHOT_RANGE", "1y");
            std::env::set_var("SNAPSHOT_LANG", "ru");
            std::env::set_var("SNAPSHOT_TIMEOUT_SECS", " 12 ");
        }

        let config = SnapshotConfig::default().with_env_overrides();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.history_range, "1y");
        assert_eq!(config.language, Language::Russian);
        assert_eq!(config.request_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_env_overrides_absent_keep_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        clear_env();

        let config = SnapshotConfig::default().with_env_overrides().unwrap();
        assert_eq!(config.history_range, "6mo");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_timeout_must_be_a_number() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        unsafe {
            std::env::set_var("SNAPSHOT_TIMEOUT_SECS", "soon");
        }

        let result = SnapshotConfig::default().with_env_overrides();
        clear_env();

        match result {
            Err(SnapshotError::ConfigError(msg)) => assert!(msg.contains("SNAPSHOT_TIMEOUT_SECS")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_range_is_validated() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        unsafe {
            std::env::set_var("SNAPSHOT_RANGE", "6 months");
        }

        let result = SnapshotConfig::default().with_env_overrides();
        clear_env();

        assert!(matches!(result, Err(SnapshotError::ConfigError(_))));
    }
}
