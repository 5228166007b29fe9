//! Report formatting

use crate::engine::AnalysisResult;
use crate::error::{Result, SnapshotError};
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

/// Shown on any failed run; the cause itself goes to the log
pub const FAILURE_MESSAGE: &str = "Error! Check the symbol or your connection.";

pub trait Formatter: Send + Sync {
    fn format(&self) -> OutputFormat;
    fn format_analysis(&self, result: &AnalysisResult, prompt: &str) -> Result<String>;
    fn format_error(&self) -> String;
}

/// Human-readable report
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn format_analysis(&self, result: &AnalysisResult, prompt: &str) -> Result<String> {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", result.symbol);
        let _ = writeln!(out, "Price:  {:.4}", result.price);
        let _ = writeln!(out, "RSI:    {:.1} ({})", result.rsi, result.rsi_zone.label());
        let _ = writeln!(out, "Trend:  {}", result.trend);
        let _ = writeln!(out, "Signal: {}", result.signal);
        if let Some(levels) = result.risk_levels() {
            let _ = writeln!(out, "SL:     {:.4}", levels.stop_loss);
            let _ = writeln!(out, "TP:     {:.4}", levels.take_profit);
        }

        out.push_str("\nNews:\n");
        for headline in &result.news {
            let _ = writeln!(out, "- {headline}");
        }

        out.push_str("\nCopy into your AI assistant:\n");
        out.push_str(prompt);
        out.push('\n');
        Ok(out)
    }

    fn format_error(&self) -> String {
        FAILURE_MESSAGE.to_string()
    }
}

/// Pretty JSON of the result plus the prompt
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    prompt: &'a str,
}

impl Formatter for JsonFormatter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn format_analysis(&self, result: &AnalysisResult, prompt: &str) -> Result<String> {
        Ok(serde_json::to_string_pretty(&JsonReport { result, prompt })?)
    }

    fn format_error(&self) -> String {
        serde_json::json!({ "error": FAILURE_MESSAGE }).to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn formatter(self) -> Box<dyn Formatter> {
        match self {
            Self::Text => Box::new(TextFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(SnapshotError::ConfigError(format!(
                "unknown output format: {other}"
            ))),
        }
    }
}
