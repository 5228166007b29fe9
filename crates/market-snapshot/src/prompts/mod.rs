//! Copy-paste prompt built from an analysis result

mod user;

pub use user::{ANALYSIS_PROMPT, analysis_prompt};

use crate::engine::AnalysisResult;
use crate::error::Result;
use crate::signals::Trend;
use serde_json::json;
use snapshot_prompt::{JinjaTemplate, Language, PromptTemplate};

/// Renders the prompt a user pastes into an external AI assistant
#[derive(Debug)]
pub struct AnalysisPrompt {
    template: JinjaTemplate,
}

impl AnalysisPrompt {
    pub fn new() -> Result<Self> {
        Ok(Self {
            template: analysis_prompt()?,
        })
    }

    /// Render for `language`, falling back to English
    pub fn render(&self, result: &AnalysisResult, language: &Language) -> Result<String> {
        let vars = json!({
            "symbol": result.symbol,
            "price": result.price,
            "rsi": result.rsi,
            "trend": trend_label(result.trend, language),
            "news": result.news,
        });
        Ok(self.template.render_with_fallback(language, &vars)?)
    }
}

/// Trend wording in the prompt's language
pub fn trend_label(trend: Trend, language: &Language) -> &'static str {
    match (language, trend) {
        (Language::Russian, Trend::Up) => "ВОСХОДЯЩИЙ",
        (Language::Russian, Trend::Down) => "НИСХОДЯЩИЙ",
        (Language::Russian, Trend::Sideways) => "БОКОВИК",
        (_, trend) => trend.label(),
    }
}
