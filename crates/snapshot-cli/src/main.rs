//! Command-line interface for market-snapshot
//!
//! ```bash
//! market-snapshot gold
//! market-snapshot EURUSD --lang ru
//! market-snapshot AAPL --format json --range 1y
//! ```

use clap::Parser;
use market_snapshot::{
    AnalysisPrompt, Language, MarketAnalyzer, OutputFormat, SnapshotConfig,
};
use snapshot_utils::AppConfig;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "market-snapshot")]
#[command(about = "One-shot technical snapshot of a market instrument", long_about = None)]
struct Args {
    /// Ticker or alias (GOLD, EURUSD, GBPUSD)
    #[arg(default_value = "GBPUSD=X")]
    symbol: String,

    /// Prompt language (en, ru)
    #[arg(short, long)]
    lang: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// History range (1mo, 3mo, 6mo, 1y, ...)
    #[arg(short, long)]
    range: Option<String>,
}

impl Args {
    /// Environment first, then flags on top
    fn snapshot_config(&self) -> anyhow::Result<SnapshotConfig> {
        let mut config = SnapshotConfig::default().with_env_overrides()?;
        if let Some(lang) = &self.lang {
            config.language = Language::from_code(lang);
        }
        if let Some(range) = &self.range {
            config.history_range = range.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

async fn run(args: &Args) -> anyhow::Result<String> {
    let config = args.snapshot_config()?;
    let language = config.language.clone();
    let analyzer = MarketAnalyzer::yahoo(Arc::new(config))?;

    let result = analyzer.analyze(&args.symbol).await?;
    let prompt = AnalysisPrompt::new()?.render(&result, &language)?;
    Ok(args.format.formatter().format_analysis(&result, &prompt)?)
}

#[tokio::main]
async fn main() -> ExitCode {
    let app = AppConfig::from_env();
    snapshot_utils::init_tracing_for(&app);

    let args = Args::parse();
    info!(app = %app.app_name, environment = %app.environment, symbol = %args.symbol, "Starting");

    match run(&args).await {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Analysis failed: {e:#}");
            println!("{}", args.format.formatter().format_error());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["market-snapshot"]).unwrap();
        assert_eq!(args.symbol, "GBPUSD=X");
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.lang.is_none());
        assert!(args.range.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "market-snapshot",
            "gold",
            "--lang",
            "ru",
            "--format",
            "json",
            "--range",
            "1y",
        ])
        .unwrap();
        assert_eq!(args.symbol, "gold");
        assert_eq!(args.format, OutputFormat::Json);

        let config = args.snapshot_config().unwrap();
        assert_eq!(config.language, Language::Russian);
        assert_eq!(config.history_range, "1y");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["market-snapshot", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_unsupported_range_is_a_config_error() {
        let args = Args::try_parse_from(["market-snapshot", "--range", "7w"]).unwrap();
        assert!(args.snapshot_config().is_err());
    }
}
