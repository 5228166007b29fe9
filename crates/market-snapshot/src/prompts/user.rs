//! User message templates handed to an external AI assistant

use snapshot_prompt::{JinjaTemplate, Result};

/// Template name of the copy-paste analysis prompt
pub const ANALYSIS_PROMPT: &str = "snapshot.user.analysis";

/// Create the copy-paste analysis prompt template
///
/// Expects `symbol`, `price`, `rsi`, `trend` and a `news` list.
pub fn analysis_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        ANALYSIS_PROMPT,
        "Analysis {{ symbol }}. Price: {{ price | fixed(4) }}. RSI: {{ rsi | fixed(1) }}. Trend: {{ trend }}. News: {{ news | join('; ') }}. Give a forecast.",
        "Анализ {{ symbol }}. Цена: {{ price | fixed(4) }}. RSI: {{ rsi | fixed(1) }}. Тренд: {{ trend }}. Новости: {{ news | join('; ') }}. Дай прогноз.",
    )
}
