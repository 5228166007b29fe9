//! Application-level configuration

use serde::{Deserialize, Serialize};

/// Settings that describe the running application rather than the analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name, used in log lines and the CLI banner
    pub app_name: String,
    /// Environment (development, production, ...)
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "market-snapshot".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl AppConfig {
    /// Override the environment from `SNAPSHOT_ENV` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(env) = std::env::var("SNAPSHOT_ENV") {
            if !env.trim().is_empty() {
                config.environment = env.trim().to_string();
            }
        }
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
